//! Diagnostic system for pinpoint error reporting.
//!
//! Every token and AST node in the front end carries a [`Context`]: the file
//! it came from and one or more highlighted ranges on its lines. Diagnostics
//! reuse the same contexts, so an error anywhere in the pipeline renders as
//!
//! ```text
//! main.kn:3:15: error: expected `)`, got `{`
//!    3 | fun add(a int {
//!      |               ^
//! ```
//!
//! - [`Context`] / [`LineSpan`] / [`Highlight`]: located, composable excerpts
//! - [`render`]: display-width aware indicator lines
//! - [`Diagnostic`]: severity, message, context, note and a chained diagnostic
//! - [`DiagnosticContainer`]: accumulation with an escalation threshold
//! - [`emitter`]: terminal output with optional color

mod container;
mod context;
mod diagnostic;
pub mod emitter;
mod error_code;
pub mod render;
mod severity;
pub mod width;

pub use container::{DiagnosticContainer, Escalation};
pub use context::{Context, ContextError, Highlight, LineSpan};
pub use diagnostic::Diagnostic;
pub use error_code::{Category, ErrorCode};
pub use severity::Severity;
