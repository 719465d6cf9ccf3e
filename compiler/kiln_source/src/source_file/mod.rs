//! Whole-file source buffer.
//!
//! The file is read once, decoded as UTF-8 and split on LF, CR and CRLF.
//! Terminator search uses `memchr2` so long lines are skipped in bulk.

use std::path::Path;
use std::sync::Arc;

use crate::{Line, LineEnding};

/// Failure to obtain the bytes of a source file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A loaded compilation unit: a file name and its lines.
///
/// Always holds at least one line. Empty input is a single empty line, and a
/// trailing terminator does not produce an extra empty line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    name: Arc<str>,
    lines: Vec<Arc<Line>>,
}

impl SourceFile {
    /// Build a source file from already-decoded text.
    pub fn new(name: impl Into<Arc<str>>, text: &str) -> Self {
        SourceFile {
            name: name.into(),
            lines: split_lines(text),
        }
    }

    /// Build a source file from raw bytes, treating them as UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD rather than rejected.
    pub fn from_bytes(name: impl Into<Arc<str>>, bytes: &[u8]) -> Self {
        Self::new(name, &String::from_utf8_lossy(bytes))
    }

    /// Read and split the file at `path`. The path's display form becomes
    /// the file name used in diagnostics.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        match std::fs::read(path) {
            Ok(bytes) => Ok(Self::from_bytes(name, &bytes)),
            Err(source) => Err(LoadError::Io { path: name, source }),
        }
    }

    #[inline]
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    #[inline]
    pub fn lines(&self) -> &[Arc<Line>] {
        &self.lines
    }

    #[inline]
    pub fn line(&self, index: usize) -> Option<&Arc<Line>> {
        self.lines.get(index)
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the last line.
    #[inline]
    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }
}

fn split_lines(text: &str) -> Vec<Arc<Line>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;

    while let Some(offset) = memchr::memchr2(b'\n', b'\r', &bytes[start..]) {
        let end = start + offset;
        let (ending, width) = match bytes[end] {
            b'\r' if bytes.get(end + 1) == Some(&b'\n') => (LineEnding::CrLf, 2),
            b'\r' => (LineEnding::Cr, 1),
            _ => (LineEnding::Lf, 1),
        };
        lines.push(Arc::new(Line::new(lines.len(), &text[start..end], ending)));
        start = end + width;
    }

    if start < bytes.len() || lines.is_empty() {
        lines.push(Arc::new(Line::new(
            lines.len(),
            &text[start..],
            LineEnding::None,
        )));
    }

    lines
}

#[cfg(test)]
mod tests;
