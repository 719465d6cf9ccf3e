//! `#inline <tag>` ... `#end-inline <tag>` raw blocks.

use kiln_diagnostic::{Context, Diagnostic, ErrorCode};
use kiln_ir::{Declaration, DirectiveHead, InlineBody, InlineDirective, Node, Terminal, TerminalKind};
use kiln_lexer_core::{Cursor, CursorState};
use kiln_source::Line;
use tracing::trace;

use super::{char_context, expect_end_of_line};

/// Columns of `line` without its leading and trailing whitespace.
fn trimmed(line: &Line) -> (usize, usize) {
    let chars = line.chars();
    let start = chars.iter().take_while(|c| c.is_whitespace()).count();
    let end = chars.len() - chars[start..].iter().rev().take_while(|c| c.is_whitespace()).count();
    (start, end)
}

fn is_closer(line: &Line, tag: &str) -> bool {
    let text = line.text();
    let mut words = text.split_whitespace();
    words.next() == Some("#end-inline") && words.next() == Some(tag) && words.next().is_none()
}

/// Handler for `inline`.
///
/// Lines up to the matching `#end-inline <tag>` are kept verbatim. A closer
/// on the line right after the opener gives an empty block with no body.
pub fn inline(cursor: &mut Cursor<'_>, head: DirectiveHead) -> Result<Declaration, Diagnostic> {
    cursor.skip_whitespace_in_line();
    let begin = cursor.state();
    cursor.eat_while(|c| c.is_alphanumeric() || c == '_');
    let (tag, tag_context) = cursor.finish(begin);
    if tag.is_empty() {
        return Err(Diagnostic::error(
            ErrorCode::E2008,
            "expected a block type after `#inline`",
            char_context(cursor, begin),
        ));
    }
    let tag = Terminal::new(TerminalKind::Identifier, tag, tag_context);
    expect_end_of_line(cursor, "inline")?;

    let mut lines = Vec::new();
    let mut contexts = Vec::new();
    loop {
        if !cursor.next_line() {
            let opener = Context::union([&head.context(), &tag.context]);
            return Err(Diagnostic::error(
                ErrorCode::E2009,
                format!("expected `#end-inline {}` before the end of input", tag.value),
                cursor.here(),
            )
            .with_related(Diagnostic::note("inline block opened here", opener)));
        }
        let line = cursor.line();
        if is_closer(line, &tag.value) {
            let (start, end) = trimmed(line);
            let (_, end) = cursor.finish_with(
                CursorState::new(line.index(), start),
                CursorState::new(line.index(), end),
            );
            cursor.eat_while(|_| true);
            trace!(tag = %tag.value, lines = lines.len(), "inline block closed");
            let body = (!lines.is_empty()).then(|| InlineBody {
                text: lines.join("\n"),
                context: Context::union(&contexts),
            });
            return Ok(Declaration::Inline(InlineDirective {
                head,
                tag,
                body,
                end,
            }));
        }
        lines.push(line.text());
        contexts.push(cursor.whole_line(line.index()));
    }
}
