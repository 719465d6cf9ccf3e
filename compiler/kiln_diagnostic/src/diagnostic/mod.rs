//! The [`Diagnostic`] type shared by every front-end phase.

use std::fmt;

use crate::{render, Context, ErrorCode, Severity};

/// A located message with an optional note and one chained related diagnostic.
///
/// The textual form (via `Display`) is:
///
/// ```text
/// main.kn:1:10: error: unexpected `stdio`
///    1 | #include stdio.h
///      |          ^
///      |          expected `<` or `"`
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code for tests and tooling. Not rendered.
    pub code: Option<ErrorCode>,
    pub message: String,
    pub context: Context,
    pub note: Option<String>,
    /// A second location this diagnostic refers to, rendered right after it.
    pub related: Option<Box<Diagnostic>>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, context: Context) -> Self {
        Diagnostic {
            severity,
            code: None,
            message: message.into(),
            context,
            note: None,
            related: None,
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode, message: impl Into<String>, context: Context) -> Self {
        Self::new(Severity::Error, message, context).with_code(code)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode, message: impl Into<String>, context: Context) -> Self {
        Self::new(Severity::Warning, message, context).with_code(code)
    }

    /// Create a note, typically chained to another diagnostic.
    pub fn note(message: impl Into<String>, context: Context) -> Self {
        Self::new(Severity::Note, message, context)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the note printed under the excerpt, replacing any previous one.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attach a related diagnostic, replacing any previous one.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related = Some(Box::new(related));
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    /// `file:line:col` of the primary context, if located.
    pub fn position(&self) -> Option<String> {
        self.context.position()
    }

    /// This diagnostic followed by its chain of related diagnostics.
    pub fn chain(&self) -> impl Iterator<Item = &Diagnostic> {
        std::iter::successors(Some(self), |d| d.related.as_deref())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.chain() {
            diagnostic.fmt_one(f)?;
        }
        Ok(())
    }
}

impl Diagnostic {
    fn fmt_one(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some(position) => writeln!(f, "{position}: {}: {}", self.severity, self.message)?,
            None => writeln!(f, "{}: {}", self.severity, self.message)?,
        }
        if self.context.spans().is_empty() {
            if let Some(note) = &self.note {
                writeln!(f, "  = note: {note}")?;
            }
            return Ok(());
        }
        f.write_str(&render::context(&self.context, self.note.as_deref()))
    }
}
