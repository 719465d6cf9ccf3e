//! A single source line and its original terminator.

use std::fmt;

/// The end-of-line marker that terminated a line in the original text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LineEnding {
    /// Last line of the file, not followed by a terminator.
    #[default]
    None,
    /// `\n`
    Lf,
    /// A bare `\r`.
    Cr,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Printable form, used when a diagnostic points at the end of a line.
    pub const fn escape(self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Lf => "\\n",
            LineEnding::Cr => "\\r",
            LineEnding::CrLf => "\\r\\n",
        }
    }
}

/// One line of source text, stored as code points.
///
/// Immutable after load. Columns everywhere in the front end are code-point
/// offsets into [`Line::chars`].
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Line {
    index: usize,
    chars: Vec<char>,
    ending: LineEnding,
}

impl Line {
    pub fn new(index: usize, text: &str, ending: LineEnding) -> Self {
        Line {
            index,
            chars: text.chars().collect(),
            ending,
        }
    }

    /// 0-based line index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based line number, as rendered in diagnostics.
    #[inline]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of code points, excluding the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    /// Code point at `column`, or `None` at or past the end of the line.
    #[inline]
    pub fn get(&self, column: usize) -> Option<char> {
        self.chars.get(column).copied()
    }

    /// The text of the line without its terminator.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The text between two columns, clamped to the line.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({}, {:?}, {:?})", self.index, self.text(), self.ending)
    }
}
