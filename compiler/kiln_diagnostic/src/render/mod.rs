//! Pointer-style excerpt rendering.
//!
//! For every highlighted line the renderer prints the numbered source line and
//! an indicator line underneath:
//!
//! ```text
//!    2 |   return a + b
//!      |          ^
//! ```
//!
//! Indicator placement is measured in display columns (see [`crate::width`]),
//! not code points, so tabs and wide characters stay aligned in a monospaced
//! terminal. A highlight at the very end of a line points at the line's
//! terminator, which is printed in escaped form (`\n`).

use std::fmt::Write;

use crate::width;
use crate::{Context, LineSpan};

/// Character repeated under highlighted code points.
pub const INDICATOR: char = '^';

/// Width of the line-number column.
const GUTTER: usize = 4;

/// The source text printed for a span's line, plus the escaped terminator
/// when a highlight points at the end of the line.
pub fn source_text(span: &LineSpan) -> String {
    let mut text = span.line().text();
    if span.touches_end() {
        text.push_str(span.line().ending().escape());
    }
    text
}

/// Spaces and indicators for every highlight on the line, in start order.
pub fn indicators(span: &LineSpan) -> String {
    let line = span.line();
    let columns = width::columns(line.chars());
    let end_marker = width::str_width(line.ending().escape()).max(1);

    let mut out = String::new();
    let mut written: usize = 0;
    for h in span.highlights() {
        let start = columns[h.start.min(line.len())];
        let count = if !h.is_empty() {
            columns[h.end.min(line.len())].saturating_sub(start)
        } else if h.start >= line.len() {
            end_marker
        } else {
            1
        };

        // Overlapping ranges only extend what is already drawn.
        let skip = written.saturating_sub(start);
        push_n(&mut out, ' ', start.saturating_sub(written));
        push_n(&mut out, INDICATOR, count.saturating_sub(skip));
        written = written.max(start + count);
    }
    out
}

/// `message` padded to start beneath the first highlight.
///
/// Returns `None` for an empty message, which suppresses the line.
pub fn message_line(span: &LineSpan, message: &str) -> Option<String> {
    if message.is_empty() {
        return None;
    }
    let column = span.first_column().unwrap_or(0).min(span.line().len());
    let pad = width::columns(span.line().chars())[column];
    let mut out = String::with_capacity(pad + message.len());
    push_n(&mut out, ' ', pad);
    out.push_str(message);
    Some(out)
}

/// Render every line of a context, with `note` aligned under the first
/// highlight of the last highlighted line.
pub fn context(context: &Context, note: Option<&str>) -> String {
    let mut out = String::new();
    for line in context.leading() {
        write_gutter(&mut out, Some(line.number()), &line.text());
    }
    for span in context.spans() {
        write_span(&mut out, span);
    }
    if let (Some(span), Some(note)) = (context.spans().last(), note) {
        if let Some(line) = message_line(span, note) {
            write_gutter(&mut out, None, &line);
        }
    }
    for line in context.trailing() {
        write_gutter(&mut out, Some(line.number()), &line.text());
    }
    out
}

fn write_span(out: &mut String, span: &LineSpan) {
    write_gutter(out, Some(span.line().number()), &source_text(span));
    if !span.highlights().is_empty() {
        write_gutter(out, None, &indicators(span));
    }
}

fn write_gutter(out: &mut String, number: Option<usize>, text: &str) {
    let _ = match number {
        Some(n) => writeln!(out, "{n:>width$} | {text}", width = GUTTER),
        None => writeln!(out, "{:>width$} | {text}", "", width = GUTTER),
    };
}

fn push_n(out: &mut String, ch: char, n: usize) {
    out.extend(std::iter::repeat(ch).take(n));
}
