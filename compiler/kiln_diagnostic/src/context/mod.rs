//! Located source excerpts.
//!
//! A [`Context`] names a file and lists the lines it covers, each as a
//! [`LineSpan`] holding sorted [`Highlight`] ranges. Tokens own a context of
//! exactly one highlight; AST nodes compute theirs by joining their children.
//!
//! `Context::default()` is the *detached* context: no file, no lines. It is
//! what context-free test fixtures carry, and it is the identity for
//! [`Context::merge`].

use std::sync::Arc;

use kiln_source::Line;
use smallvec::SmallVec;

/// A code-point range `[start, end)` within one line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
}

impl Highlight {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "highlight start {start} exceeds end {end}");
        Highlight { start, end }
    }

    /// Zero-width highlight at `column`.
    pub fn point(column: usize) -> Self {
        Highlight {
            start: column,
            end: column,
        }
    }

    #[inline]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// One line of a context and the ranges highlighted on it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LineSpan {
    line: Arc<Line>,
    /// Sorted by `start`; kept sorted on every insertion.
    highlights: SmallVec<[Highlight; 2]>,
}

impl LineSpan {
    /// A line with no highlights yet.
    pub fn new(line: Arc<Line>) -> Self {
        LineSpan {
            line,
            highlights: SmallVec::new(),
        }
    }

    pub fn with_highlight(line: Arc<Line>, highlight: Highlight) -> Self {
        let mut span = Self::new(line);
        span.highlight(highlight);
        span
    }

    /// Insert a highlight, keeping the list sorted by start column.
    pub fn highlight(&mut self, highlight: Highlight) {
        debug_assert!(
            highlight.end <= self.line.len(),
            "highlight end {} exceeds line length {}",
            highlight.end,
            self.line.len()
        );
        let at = self
            .highlights
            .partition_point(|h| h.start <= highlight.start);
        self.highlights.insert(at, highlight);
    }

    #[inline]
    pub fn line(&self) -> &Arc<Line> {
        &self.line
    }

    #[inline]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Start column of the first highlight, if any.
    pub fn first_column(&self) -> Option<usize> {
        self.highlights.first().map(|h| h.start)
    }

    /// Whether any highlight sits at the end of the line.
    pub fn touches_end(&self) -> bool {
        let len = self.line.len();
        self.highlights.iter().any(|h| h.start >= len)
    }

    /// The highlighted text, ranges concatenated in order.
    pub fn highlighted_text(&self) -> String {
        self.highlights
            .iter()
            .map(|h| self.line.slice(h.start, h.end))
            .collect()
    }
}

/// Joining contexts that belong to different files.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("cannot join a context from `{left}` with one from `{right}`")]
    FileMismatch { left: String, right: String },
}

/// A located excerpt of source text with highlighted ranges.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Context {
    file: Option<Arc<str>>,
    spans: Vec<LineSpan>,
    leading: Vec<Arc<Line>>,
    trailing: Vec<Arc<Line>>,
}

impl Context {
    /// A context that names a file but covers no lines.
    ///
    /// Used for failures that have no position, such as an unreadable file.
    pub fn file_only(file: Arc<str>) -> Self {
        Context {
            file: Some(file),
            ..Context::default()
        }
    }

    /// A context covering one highlight on one line.
    pub fn at(file: Arc<str>, line: Arc<Line>, highlight: Highlight) -> Self {
        Context {
            file: Some(file),
            spans: vec![LineSpan::with_highlight(line, highlight)],
            ..Context::default()
        }
    }

    /// Build from already-assembled line spans.
    pub fn from_spans(file: Arc<str>, spans: Vec<LineSpan>) -> Self {
        Context {
            file: Some(file),
            spans,
            ..Context::default()
        }
    }

    /// Join several contexts into one. Fails if they name different files.
    pub fn join<'a>(
        contexts: impl IntoIterator<Item = &'a Context>,
    ) -> Result<Context, ContextError> {
        let mut joined = Context::default();
        for context in contexts {
            joined.merge(context)?;
        }
        Ok(joined)
    }

    /// Join contexts that are known to come from a single file.
    ///
    /// AST nodes are built from tokens of one file, so a mismatch here is a
    /// programmer error; it is caught in debug builds and the offending part
    /// is skipped otherwise.
    pub fn union<'a>(contexts: impl IntoIterator<Item = &'a Context>) -> Context {
        let mut joined = Context::default();
        for context in contexts {
            let merged = joined.merge(context);
            debug_assert!(merged.is_ok(), "{merged:?}");
        }
        joined
    }

    /// Merge `other` into `self`.
    ///
    /// Highlights on a line already present are added to that line;
    /// other lines are placed in line order.
    pub fn merge(&mut self, other: &Context) -> Result<(), ContextError> {
        match (&self.file, &other.file) {
            (_, None) => return Ok(()),
            (None, Some(file)) => self.file = Some(Arc::clone(file)),
            (Some(left), Some(right)) if left != right => {
                return Err(ContextError::FileMismatch {
                    left: left.to_string(),
                    right: right.to_string(),
                });
            }
            (Some(_), Some(_)) => {}
        }

        for span in &other.spans {
            let index = span.line.index();
            match self
                .spans
                .binary_search_by_key(&index, |s| s.line.index())
            {
                Ok(existing) => {
                    for &h in &span.highlights {
                        self.spans[existing].highlight(h);
                    }
                }
                Err(at) => self.spans.insert(at, span.clone()),
            }
        }

        if self.leading.is_empty() {
            self.leading.clone_from(&other.leading);
        }
        if self.trailing.is_empty() {
            self.trailing.clone_from(&other.trailing);
        }
        Ok(())
    }

    /// Lines to print above the first highlighted line.
    #[must_use]
    pub fn with_leading(mut self, lines: Vec<Arc<Line>>) -> Self {
        self.leading = lines;
        self
    }

    /// Lines to print below the last highlighted line.
    #[must_use]
    pub fn with_trailing(mut self, lines: Vec<Arc<Line>>) -> Self {
        self.trailing = lines;
        self
    }

    #[inline]
    pub fn file(&self) -> Option<&Arc<str>> {
        self.file.as_ref()
    }

    #[inline]
    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    #[inline]
    pub fn leading(&self) -> &[Arc<Line>] {
        &self.leading
    }

    #[inline]
    pub fn trailing(&self) -> &[Arc<Line>] {
        &self.trailing
    }

    /// True for the detached context of context-free fixtures.
    pub fn is_detached(&self) -> bool {
        self.file.is_none()
    }

    /// 1-based `(line, column)` of the first highlight.
    pub fn start(&self) -> Option<(usize, usize)> {
        let span = self.spans.first()?;
        Some((span.line.number(), span.first_column().unwrap_or(0) + 1))
    }

    /// `file:line:col` of the first highlight, or just the file name.
    pub fn position(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        Some(match self.start() {
            Some((line, column)) => format!("{file}:{line}:{column}"),
            None => file.to_string(),
        })
    }

    /// All highlighted text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(LineSpan::highlighted_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
