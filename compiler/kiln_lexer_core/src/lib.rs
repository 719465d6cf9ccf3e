//! Position tracking over a [`SourceFile`](kiln_source::SourceFile).
//!
//! The [`Cursor`] is the only way the lexer and the directive handlers read
//! source text. Its state is a `Copy` `(line, column)` pair, so speculative
//! scans snapshot it with [`Cursor::state`] and roll back with
//! [`Cursor::set_state`].

mod cursor;

pub use cursor::{Cursor, CursorState, Peek, Position};
