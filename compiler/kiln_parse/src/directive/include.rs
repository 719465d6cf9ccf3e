//! `#include <path>` and `#include "path"`.

use kiln_diagnostic::{Context, Diagnostic, ErrorCode};
use kiln_ir::{
    Declaration, DirectiveHead, IncludeDirective, Operator, Punct, QuoteKind, Terminal,
    TerminalKind,
};
use kiln_lexer_core::Cursor;

use super::{char_context, expect_end_of_line, take};

fn quote_kind(quote: QuoteKind) -> TerminalKind {
    match quote {
        QuoteKind::Angle => TerminalKind::Operator(Operator::Lt),
        QuoteKind::Quote => TerminalKind::Punctuation(Punct::Quote),
    }
}

fn closer_kind(quote: QuoteKind) -> TerminalKind {
    match quote {
        QuoteKind::Angle => TerminalKind::Operator(Operator::Gt),
        QuoteKind::Quote => TerminalKind::Punctuation(Punct::Quote),
    }
}

/// Handler for `include`.
pub fn include(cursor: &mut Cursor<'_>, head: DirectiveHead) -> Result<Declaration, Diagnostic> {
    cursor.skip_whitespace_in_line();
    let quote = match cursor.current() {
        Some(ch) => QuoteKind::from_opener(ch).ok_or_else(|| {
            Diagnostic::error(
                ErrorCode::E2004,
                format!("unexpected `{ch}`, expected `<` or `\"`"),
                char_context(cursor, cursor.state()),
            )
        })?,
        None => {
            return Err(Diagnostic::error(
                ErrorCode::E2004,
                "expected `<` or `\"` after `#include`",
                cursor.here(),
            ));
        }
    };
    let opener = take(cursor, quote_kind(quote));

    let begin = cursor.state();
    loop {
        match cursor.current() {
            None => {
                return Err(Diagnostic::error(
                    ErrorCode::E2005,
                    format!("expected `{}` before the end of the line", quote.closer()),
                    cursor.here(),
                )
                .with_related(Diagnostic::note("include path starts here", opener.context)));
            }
            Some(ch) if ch == quote.closer() => break,
            Some(ch @ ('>' | '"')) => {
                return Err(Diagnostic::error(
                    ErrorCode::E2006,
                    format!("mismatched `{ch}`, expected `{}`", quote.closer()),
                    char_context(cursor, cursor.state()),
                )
                .with_related(Diagnostic::note(
                    format!("opened with `{}` here", quote.opener()),
                    opener.context,
                )));
            }
            Some(_) => cursor.next_in_line(),
        }
    }
    let (path, path_context) = cursor.finish(begin);
    let closer = take(cursor, closer_kind(quote));
    if path.is_empty() {
        return Err(Diagnostic::error(
            ErrorCode::E2007,
            "empty include path",
            Context::union([&opener.context, &closer.context]),
        ));
    }
    expect_end_of_line(cursor, "include")?;

    Ok(Declaration::Include(IncludeDirective {
        head,
        quote,
        opener,
        path: Terminal::new(TerminalKind::String, path, path_context),
        closer,
    }))
}
