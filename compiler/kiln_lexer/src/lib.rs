//! Kiln lexer.
//!
//! Turns the code points under a [`Cursor`] into [`Terminal`]s:
//!
//! - identifiers and keywords
//! - decimal, octal, hex and floating-point literals
//! - single-line string literals
//! - operators and punctuation by greedy longest match ([`SYMBOLS`])
//!
//! Directives are not tokens; the parser scans `#` lines itself and calls
//! [`lex_token`] for everything else.
//!
//! [`Terminal`]: kiln_ir::Terminal

mod errors;
mod number;
mod scan;
mod symbols;

use kiln_diagnostic::Context;
use kiln_lexer_core::{Cursor, CursorState};

pub use scan::{lex_all, lex_token, skip_trivia};
pub use symbols::{is_symbol_start, match_symbol, SYMBOLS};

/// Context of the single code point at `state`, or a point at end of line.
pub(crate) fn char_at(cursor: &Cursor<'_>, state: CursorState) -> Context {
    let line = &cursor.file().lines()[state.line];
    if state.column >= line.len() {
        return cursor.point(state);
    }
    let end = CursorState::new(state.line, state.column + 1);
    cursor.finish_with(state, end).1
}
