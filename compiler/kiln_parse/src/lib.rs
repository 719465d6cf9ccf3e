//! Kiln parser.
//!
//! Parsing runs in two passes:
//!
//! 1. [`scan`] lexes the file into [`Item`]s, dispatching `#` lines to the
//!    [`DirectiveRegistry`] so directives arrive as finished declarations.
//! 2. [`Parser`] walks the items with an index and builds a [`Document`].
//!
//! ```
//! use kiln_parse::{parse, DirectiveRegistry};
//! use kiln_source::SourceFile;
//!
//! let file = SourceFile::new("main.kn", "#include <stdio.h>\nfun main() {}\n");
//! let document = parse(&file, &DirectiveRegistry::with_builtins()).unwrap_or_default();
//! assert_eq!(document.declarations.len(), 2);
//! ```
//!
//! [`Document`]: kiln_ir::Document

mod directive;
mod parser;
mod scan;

pub use directive::{include, inline, scan_directive, DirectiveHandler, DirectiveRegistry};
pub use parser::{parse, Parser};
pub use scan::{scan, Item};
