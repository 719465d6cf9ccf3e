//! Operator and punctuation table with greedy longest-match lookup.
//!
//! [`SYMBOLS`] is ordered by non-increasing length, so the first entry that
//! matches at the cursor is the longest. Among entries of equal length the
//! earlier one wins; no two entries share a spelling, so that order only
//! matters for readability.

use kiln_ir::{Operator, Punct, TerminalKind};
use kiln_lexer_core::Cursor;

const fn op(operator: Operator) -> (&'static str, TerminalKind) {
    (operator.as_symbol(), TerminalKind::Operator(operator))
}

const fn punct(punct: Punct) -> (&'static str, TerminalKind) {
    (punct.as_symbol(), TerminalKind::Punctuation(punct))
}

/// Every operator and punctuation spelling, longest first.
pub const SYMBOLS: &[(&str, TerminalKind)] = &[
    // 3
    op(Operator::ShlAssign),
    op(Operator::ShrAssign),
    punct(Punct::Ellipsis),
    // 2
    op(Operator::Eq),
    op(Operator::NotEq),
    op(Operator::LtEq),
    op(Operator::GtEq),
    op(Operator::And),
    op(Operator::Or),
    op(Operator::Shl),
    op(Operator::Shr),
    op(Operator::AddAssign),
    op(Operator::SubAssign),
    op(Operator::MulAssign),
    op(Operator::DivAssign),
    op(Operator::ModAssign),
    op(Operator::AndAssign),
    op(Operator::OrAssign),
    op(Operator::XorAssign),
    punct(Punct::Arrow),
    op(Operator::Increment),
    op(Operator::Decrement),
    // 1
    op(Operator::Assign),
    op(Operator::Lt),
    op(Operator::Gt),
    op(Operator::Not),
    op(Operator::Add),
    op(Operator::Sub),
    op(Operator::Mul),
    op(Operator::Div),
    op(Operator::Mod),
    op(Operator::BitAnd),
    op(Operator::BitOr),
    op(Operator::BitXor),
    op(Operator::BitNot),
    punct(Punct::LParen),
    punct(Punct::RParen),
    punct(Punct::LBrace),
    punct(Punct::RBrace),
    punct(Punct::LBracket),
    punct(Punct::RBracket),
    punct(Punct::Comma),
    punct(Punct::Semicolon),
    punct(Punct::Colon),
    punct(Punct::Dot),
    punct(Punct::Question),
];

/// Whether `ch` can start an operator or punctuation token.
///
/// `_` starts identifiers, `"` strings and `#` directives.
pub fn is_symbol_start(ch: char) -> bool {
    ch.is_ascii_punctuation() && !matches!(ch, '_' | '"' | '#')
}

/// Consume the longest symbol at the cursor.
///
/// Returns `None`, without moving, if no entry matches.
pub fn match_symbol(cursor: &mut Cursor<'_>) -> Option<TerminalKind> {
    SYMBOLS
        .iter()
        .find(|(spelling, _)| cursor.peek_string(spelling))
        .map(|&(spelling, kind)| {
            cursor.next_string(spelling);
            kind
        })
}
