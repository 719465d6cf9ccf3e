//! Diagnostic Emitters
//!
//! Writes diagnostics to an output stream. The terminal emitter prints the
//! same text as `Diagnostic`'s `Display`, optionally with ANSI colors.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// A sink for diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic, including its related chain.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit each diagnostic in order.
    fn emit_all<'a>(&mut self, diagnostics: impl IntoIterator<Item = &'a Diagnostic>)
    where
        Self: Sized,
    {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush the underlying writer.
    fn flush(&mut self);

    /// Closing line such as `error: aborting due to previous error`; nothing
    /// when both counts are zero.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
