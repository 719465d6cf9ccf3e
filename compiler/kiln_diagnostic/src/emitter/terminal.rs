//! Plain-text diagnostics for terminals, with optional ANSI styling.

use std::io::{self, Write};

use crate::{render, Diagnostic, Severity};

use super::DiagnosticEmitter;

/// SGR sequences used for styled output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Style {
    Bold,
    Red,
    Yellow,
    Green,
    Cyan,
}

impl Style {
    const RESET: &'static str = "\x1b[0m";

    fn code(self) -> &'static str {
        match self {
            Style::Bold => "\x1b[1m",
            Style::Red => "\x1b[1;31m",
            Style::Yellow => "\x1b[1;33m",
            Style::Green => "\x1b[1;32m",
            Style::Cyan => "\x1b[1;36m",
        }
    }

    fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Fatal | Severity::Error => Style::Red,
            Severity::Warning => Style::Yellow,
            Severity::Remark => Style::Green,
            Severity::Note | Severity::Ignored => Style::Cyan,
        }
    }
}

/// When to style output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "unknown color mode `{other}` (expected `auto`, `always` or `never`)"
            )),
        }
    }
}

/// Writes diagnostics in the golden text layout.
///
/// With colors off the output is byte-for-byte the `Display` form of each
/// diagnostic. Write errors are ignored.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` is consulted only for [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, text: &str, style: Style) {
        let _ = if self.colors {
            write!(self.writer, "{}{text}{}", style.code(), Style::RESET)
        } else {
            self.writer.write_all(text.as_bytes())
        };
    }

    fn plain(&mut self, text: &str) {
        let _ = self.writer.write_all(text.as_bytes());
    }

    /// `file:line:col: severity: message` and the excerpt below it.
    fn emit_one(&mut self, diagnostic: &Diagnostic) {
        if let Some(position) = diagnostic.position() {
            self.paint(&position, Style::Bold);
            self.plain(": ");
        }
        self.paint(
            diagnostic.severity.as_str(),
            Style::for_severity(diagnostic.severity),
        );
        self.plain(": ");
        self.paint(&diagnostic.message, Style::Bold);
        self.plain("\n");

        if !diagnostic.context.spans().is_empty() {
            let excerpt = render::context(&diagnostic.context, diagnostic.note.as_deref());
            self.plain(&excerpt);
        } else if let Some(note) = &diagnostic.note {
            self.plain("  = ");
            self.paint("note", Style::Bold);
            self.plain(&format!(": {note}\n"));
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        for diagnostic in diagnostic.chain() {
            self.emit_one(diagnostic);
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let line = match (error_count, warning_count) {
            (0, 0) => return,
            (0, warnings) => {
                self.paint("warning", Style::Yellow);
                format!(": {} emitted\n", counted(warnings, "warning"))
            }
            (errors, warnings) => {
                self.paint("error", Style::Red);
                let errors = if errors == 1 {
                    "previous error".to_string()
                } else {
                    format!("{errors} previous errors")
                };
                if warnings == 0 {
                    format!(": aborting due to {errors}\n")
                } else {
                    format!(
                        ": aborting due to {errors}; {} emitted\n",
                        counted(warnings, "warning")
                    )
                }
            }
        };
        self.plain(&line);
    }
}

#[cfg(test)]
mod tests;
