//! Forward-moving cursor with O(1) snapshot and restore.
//!
//! Columns are code-point offsets into [`Line::chars`]. A column equal to the
//! line length means "at end of line"; the cursor is at end of file when it
//! sits at the end of the last line.

use std::fmt;
use std::sync::Arc;

use kiln_diagnostic::{Context, Highlight, LineSpan};
use kiln_source::{Line, SourceFile};

/// A saved cursor position.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct CursorState {
    pub line: usize,
    pub column: usize,
}

impl CursorState {
    pub const fn new(line: usize, column: usize) -> Self {
        CursorState { line, column }
    }
}

/// Result of [`Cursor::peek`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Peek {
    /// The code point, or `None` past the end of the line.
    pub ch: Option<char>,
    pub eol: bool,
    pub eof: bool,
}

/// A 1-based `file:line:col` position for display.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Position {
    pub file: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Cursor over a borrowed [`SourceFile`].
///
/// Cloning or copying the state never aliases: two lookaheads from the same
/// snapshot cannot observe each other.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    file: &'a SourceFile,
    state: CursorState,
}

impl<'a> Cursor<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Cursor {
            file,
            state: CursorState::default(),
        }
    }

    #[inline]
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    #[inline]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Restore a state captured with [`state`](Self::state).
    pub fn set_state(&mut self, state: CursorState) {
        debug_assert!(
            state.line < self.file.line_count(),
            "line {} out of range",
            state.line
        );
        self.state = state;
    }

    /// The current line.
    #[inline]
    pub fn line(&self) -> &'a Arc<Line> {
        &self.file.lines()[self.state.line]
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.state.column
    }

    /// Look `offset` code points ahead without moving. Never crosses lines.
    pub fn peek(&self, offset: usize) -> Peek {
        let column = self.state.column + offset;
        let line = self.line();
        let eol = column >= line.len();
        Peek {
            ch: line.get(column),
            eol,
            eof: eol && self.state.line == self.file.last_line(),
        }
    }

    /// The current code point, `None` at end of line.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.line().get(self.state.column)
    }

    #[inline]
    pub fn at_eol(&self) -> bool {
        self.state.column >= self.line().len()
    }

    #[inline]
    pub fn at_eof(&self) -> bool {
        self.at_eol() && self.state.line == self.file.last_line()
    }

    /// Advance one code point, staying on the current line.
    pub fn next_in_line(&mut self) {
        if !self.at_eol() {
            self.state.column += 1;
        }
    }

    /// Advance one code point. At end of line, move to the start of the next
    /// line that has content, or to end of file if there is none.
    #[allow(
        clippy::should_implement_trait,
        reason = "a cursor step, not an iterator: it yields nothing"
    )]
    pub fn next(&mut self) {
        if !self.at_eol() {
            self.state.column += 1;
            return;
        }
        let lines = self.file.lines();
        match (self.state.line + 1..lines.len()).find(|&i| !lines[i].is_empty()) {
            Some(line) => self.state = CursorState::new(line, 0),
            None => self.state = self.eof_state(),
        }
    }

    /// Move to column 0 of the following line.
    ///
    /// Returns `false`, leaving the cursor at end of file, when this is the
    /// last line.
    pub fn next_line(&mut self) -> bool {
        if self.state.line >= self.file.last_line() {
            self.state = self.eof_state();
            return false;
        }
        self.state = CursorState::new(self.state.line + 1, 0);
        true
    }

    /// Whether `s` appears at the cursor on the current line.
    pub fn peek_string(&self, s: &str) -> bool {
        let rest = &self.line().chars()[self.state.column.min(self.line().len())..];
        let mut rest = rest.iter();
        s.chars().all(|c| rest.next() == Some(&c))
    }

    /// Consume `s` if it appears at the cursor on the current line.
    pub fn next_string(&mut self, s: &str) -> bool {
        if !self.peek_string(s) {
            return false;
        }
        self.state.column += s.chars().count();
        true
    }

    /// Skip whitespace, crossing line boundaries.
    pub fn skip_whitespace(&mut self) {
        loop {
            self.skip_whitespace_in_line();
            if !self.at_eol() || !self.next_line() {
                return;
            }
        }
    }

    /// Skip whitespace without leaving the current line.
    pub fn skip_whitespace_in_line(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.state.column += 1;
        }
    }

    /// Advance while `pred` holds for the current code point, within the line.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current().is_some_and(&pred) {
            self.state.column += 1;
        }
    }

    /// Whether only whitespace precedes the cursor on its line.
    pub fn is_first_non_whitespace(&self) -> bool {
        let line = self.line();
        line.chars()[..self.state.column.min(line.len())]
            .iter()
            .all(|c| c.is_whitespace())
    }

    /// Text and context from `begin` to the cursor.
    ///
    /// # Panics
    ///
    /// If `begin` is on a different line than the cursor.
    pub fn finish(&self, begin: CursorState) -> (String, Context) {
        self.finish_with(begin, self.state)
    }

    /// Text and context between two positions on one line.
    ///
    /// # Panics
    ///
    /// If `begin` and `end` are on different lines or out of order.
    pub fn finish_with(&self, begin: CursorState, end: CursorState) -> (String, Context) {
        assert!(
            begin.line == end.line,
            "cannot extract a single-line span across lines {} and {}",
            begin.line,
            end.line
        );
        assert!(
            begin.column <= end.column,
            "span start {} exceeds end {}",
            begin.column,
            end.column
        );
        let line = &self.file.lines()[begin.line];
        let text = line.slice(begin.column, end.column);
        let context = Context::at(
            Arc::clone(self.file.name()),
            Arc::clone(line),
            Highlight::new(begin.column, end.column),
        );
        (text, context)
    }

    /// Zero-width context at the cursor.
    pub fn here(&self) -> Context {
        self.point(self.state)
    }

    /// Zero-width context at `state`.
    pub fn point(&self, state: CursorState) -> Context {
        Context::at(
            Arc::clone(self.file.name()),
            Arc::clone(&self.file.lines()[state.line]),
            Highlight::point(state.column),
        )
    }

    /// Context highlighting all of `line`, for multi-line constructs.
    pub fn whole_line(&self, line: usize) -> Context {
        let line = &self.file.lines()[line];
        Context::from_spans(
            Arc::clone(self.file.name()),
            vec![LineSpan::with_highlight(
                Arc::clone(line),
                Highlight::new(0, line.len()),
            )],
        )
    }

    /// 1-based position of the cursor.
    pub fn position(&self) -> Position {
        Position {
            file: Arc::clone(self.file.name()),
            line: self.state.line + 1,
            column: self.state.column + 1,
        }
    }

    /// Attach up to `before` lines above and `after` lines below the lines
    /// `context` covers (or the cursor's line, for a context with no lines).
    pub fn surrounding(&self, context: Context, before: usize, after: usize) -> Context {
        let first = context
            .spans()
            .first()
            .map_or(self.state.line, |s| s.line().index());
        let last = context
            .spans()
            .last()
            .map_or(self.state.line, |s| s.line().index());
        let lines = self.file.lines();
        let leading = lines[first.saturating_sub(before)..first].to_vec();
        let end = (last + 1 + after).min(lines.len());
        let trailing = lines[(last + 1).min(end)..end].to_vec();
        context.with_leading(leading).with_trailing(trailing)
    }

    fn eof_state(&self) -> CursorState {
        let last = self.file.last_line();
        CursorState::new(last, self.file.lines()[last].len())
    }
}
