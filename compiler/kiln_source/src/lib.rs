//! Line-oriented source buffers.
//!
//! A [`SourceFile`] is loaded once per compilation unit and split into
//! [`Line`]s of Unicode code points. Each line remembers the terminator that
//! ended it in the original text, so diagnostics can show a literal `\n` or
//! `\r\n` when a scan runs into the end of a line.
//!
//! Line indices are 0-based internally; [`Line::number`] gives the 1-based
//! number used in rendered output.

mod line;
mod source_file;

pub use line::{Line, LineEnding};
pub use source_file::{LoadError, SourceFile};
