//! Numeric literals.
//!
//! | Form            | Kind                       |
//! |-----------------|----------------------------|
//! | `0x1F`, `0X1f`  | `Integer(Hex)`             |
//! | `017`           | `Integer(Octal)`           |
//! | `42`, `0`       | `Integer(Decimal)`         |
//! | `1.5`, `2e-3`   | `Float`                    |
//!
//! A literal must not run straight into an identifier character: `12ab` is a
//! malformed number, not `12` followed by `ab`.

use kiln_diagnostic::Diagnostic;
use kiln_ir::{IntBase, Terminal, TerminalKind};
use kiln_lexer_core::{Cursor, CursorState};

use crate::{char_at, errors};

/// Lex the literal starting at the current digit.
pub(crate) fn lex_number(cursor: &mut Cursor<'_>) -> Result<Terminal, Diagnostic> {
    debug_assert!(cursor.current().is_some_and(|c| c.is_ascii_digit()));
    let begin = cursor.state();

    if cursor.peek_string("0x") || cursor.peek_string("0X") {
        cursor.next_in_line();
        cursor.next_in_line();
        let digits = cursor.column();
        cursor.eat_while(|c| c.is_ascii_hexdigit());
        if cursor.column() == digits {
            return Err(errors::malformed_number(
                "expected hexadecimal digits after `0x`",
                char_at(cursor, cursor.state()),
            ));
        }
        return finish(cursor, begin, TerminalKind::Integer(IntBase::Hex), "hexadecimal");
    }

    cursor.eat_while(|c| c.is_ascii_digit());
    let mut is_float = false;
    if cursor.current() == Some('.') {
        cursor.next_in_line();
        cursor.eat_while(|c| c.is_ascii_digit());
        is_float = true;
    }
    if matches!(cursor.current(), Some('e' | 'E')) {
        cursor.next_in_line();
        if matches!(cursor.current(), Some('+' | '-')) {
            cursor.next_in_line();
        }
        let digits = cursor.column();
        cursor.eat_while(|c| c.is_ascii_digit());
        if cursor.column() == digits {
            return Err(errors::malformed_number(
                "expected digits in exponent",
                char_at(cursor, cursor.state()),
            ));
        }
        is_float = true;
    }
    if is_float {
        return finish(cursor, begin, TerminalKind::Float, "floating-point");
    }

    let digits = cursor.column() - begin.column;
    if digits > 1 && cursor.line().get(begin.column) == Some('0') {
        let invalid = (begin.column + 1..cursor.column())
            .find(|&column| cursor.line().get(column).is_some_and(|c| c > '7'));
        if let Some(column) = invalid {
            let at = CursorState::new(begin.line, column);
            let digit = cursor.line().get(column).unwrap_or('8');
            return Err(errors::malformed_number(
                format!("invalid digit `{digit}` in octal literal"),
                char_at(cursor, at),
            ));
        }
        return finish(cursor, begin, TerminalKind::Integer(IntBase::Octal), "octal");
    }
    finish(cursor, begin, TerminalKind::Integer(IntBase::Decimal), "decimal")
}

/// Reject an identifier character glued to the literal, then extract it.
fn finish(
    cursor: &Cursor<'_>,
    begin: CursorState,
    kind: TerminalKind,
    description: &str,
) -> Result<Terminal, Diagnostic> {
    if let Some(ch) = cursor.current().filter(|&c| c.is_alphanumeric() || c == '_') {
        return Err(errors::malformed_number(
            format!("invalid character `{ch}` in {description} literal"),
            char_at(cursor, cursor.state()),
        ));
    }
    let (value, context) = cursor.finish(begin);
    Ok(Terminal::new(kind, value, context))
}

#[cfg(test)]
mod tests;
