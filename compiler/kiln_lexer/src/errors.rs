//! Diagnostic constructors for lexer failures.

use kiln_diagnostic::{Context, Diagnostic, ErrorCode};

#[cold]
pub(crate) fn invalid_character(ch: char, context: Context) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::E1001,
        format!("invalid character `{}`", ch.escape_debug()),
        context,
    )
}

#[cold]
pub(crate) fn unknown_symbol(ch: char, context: Context) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002, format!("unknown symbol `{ch}`"), context)
}

#[cold]
pub(crate) fn malformed_number(message: impl Into<String>, context: Context) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003, message, context)
}

#[cold]
pub(crate) fn unterminated_string(end: Context, opener: Context) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1004, "unterminated string literal", end)
        .with_note("expected `\"` before the end of the line")
        .with_related(Diagnostic::note("string starts here", opener))
}

#[cold]
pub(crate) fn end_of_input(context: Context) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3002, "unexpected end of input", context)
}
