//! Token classification.
//!
//! [`lex_token`] looks at the current code point and dispatches to the
//! identifier, number, string or symbol scanner. Trivia is not skipped here;
//! callers run [`skip_trivia`] first.

use kiln_diagnostic::Diagnostic;
use kiln_ir::{Keyword, Terminal, TerminalKind};
use kiln_lexer_core::Cursor;
use kiln_source::SourceFile;

use crate::number::lex_number;
use crate::symbols::{is_symbol_start, match_symbol};
use crate::{char_at, errors};

/// Skip whitespace and `//` comments, crossing line boundaries.
pub fn skip_trivia(cursor: &mut Cursor<'_>) {
    loop {
        cursor.skip_whitespace();
        if !cursor.peek_string("//") {
            return;
        }
        cursor.eat_while(|_| true);
    }
}

#[inline]
fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

#[inline]
fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Lex one token at the cursor.
///
/// # Errors
///
/// A lex diagnostic for invalid characters, unknown symbols, malformed
/// numbers and unterminated strings, or an end-of-input error if the cursor
/// is not on a code point.
pub fn lex_token(cursor: &mut Cursor<'_>) -> Result<Terminal, Diagnostic> {
    let Some(ch) = cursor.current() else {
        return Err(errors::end_of_input(cursor.here()));
    };
    if is_ident_start(ch) {
        Ok(lex_word(cursor))
    } else if ch.is_ascii_digit() {
        lex_number(cursor)
    } else if ch == '"' {
        lex_string(cursor)
    } else if is_symbol_start(ch) {
        lex_symbol(cursor, ch)
    } else {
        Err(errors::invalid_character(ch, char_at(cursor, cursor.state())))
    }
}

fn lex_word(cursor: &mut Cursor<'_>) -> Terminal {
    let begin = cursor.state();
    cursor.eat_while(is_ident_continue);
    let (value, context) = cursor.finish(begin);
    let kind = Keyword::lookup(&value).map_or(TerminalKind::Identifier, TerminalKind::Keyword);
    Terminal::new(kind, value, context)
}

/// `"..."` on one line; a backslash escapes the next code point. The value
/// keeps the quotes and escapes as written.
fn lex_string(cursor: &mut Cursor<'_>) -> Result<Terminal, Diagnostic> {
    let begin = cursor.state();
    cursor.next_in_line();
    loop {
        match cursor.current() {
            None => {
                return Err(errors::unterminated_string(
                    cursor.here(),
                    char_at(cursor, begin),
                ));
            }
            Some('"') => {
                cursor.next_in_line();
                break;
            }
            Some('\\') => {
                cursor.next_in_line();
                cursor.next_in_line();
            }
            Some(_) => cursor.next_in_line(),
        }
    }
    let (value, context) = cursor.finish(begin);
    Ok(Terminal::new(TerminalKind::String, value, context))
}

fn lex_symbol(cursor: &mut Cursor<'_>, ch: char) -> Result<Terminal, Diagnostic> {
    let begin = cursor.state();
    let Some(kind) = match_symbol(cursor) else {
        return Err(errors::unknown_symbol(ch, char_at(cursor, begin)));
    };
    let (value, context) = cursor.finish(begin);
    Ok(Terminal::new(kind, value, context))
}

/// Lex every token of a file that contains no directives.
///
/// # Errors
///
/// The first lex diagnostic. A `#` is an invalid character here; directive
/// lines are handled by the parser's pre-scan.
pub fn lex_all(file: &SourceFile) -> Result<Vec<Terminal>, Diagnostic> {
    let mut cursor = Cursor::new(file);
    let mut tokens = Vec::new();
    loop {
        skip_trivia(&mut cursor);
        if cursor.at_eof() {
            return Ok(tokens);
        }
        tokens.push(lex_token(&mut cursor)?);
    }
}
