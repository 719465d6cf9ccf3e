//! Semantic checks over a parsed document.
//!
//! A check is a plain function; [`run_checks`] applies a list of them in
//! order and stops at the first failure.

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_ir::{Document, Node, Statement, Terminal};
use rustc_hash::FxHashMap;
use tracing::trace;

/// A semantic check.
pub type Check = fn(&Document) -> Result<(), Diagnostic>;

/// Checks run by a session unless disabled.
pub const DEFAULT_CHECKS: &[Check] = &[duplicate_arguments, return_arity];

/// Run `checks` in order, stopping at the first failure.
pub fn run_checks(document: &Document, checks: &[Check]) -> Result<(), Diagnostic> {
    for (index, check) in checks.iter().enumerate() {
        trace!(index, "running check");
        check(document)?;
    }
    Ok(())
}

/// No function declares two arguments with the same name.
pub fn duplicate_arguments(document: &Document) -> Result<(), Diagnostic> {
    for function in document.functions() {
        let mut seen: FxHashMap<&str, &Terminal> = FxHashMap::default();
        for argument in &function.arguments {
            if let Some(first) = seen.insert(&argument.name.value, &argument.name) {
                return Err(Diagnostic::error(
                    ErrorCode::E5001,
                    format!(
                        "duplicate argument `{}` in `{}`",
                        argument.name.value, function.name.value
                    ),
                    argument.name.context.clone(),
                )
                .with_related(Diagnostic::note(
                    "first declared here",
                    first.context.clone(),
                )));
            }
        }
    }
    Ok(())
}

/// Every `return` yields as many values as the function declares.
///
/// A function without a return type list returns nothing.
pub fn return_arity(document: &Document) -> Result<(), Diagnostic> {
    for function in document.functions() {
        let declared = function.returns.as_ref().map_or(0, |r| r.types.len());
        for statement in &function.statements {
            let Statement::Return(ret) = statement;
            let actual = ret.values.len();
            if actual != declared {
                let mut diagnostic = Diagnostic::error(
                    ErrorCode::E5002,
                    format!(
                        "`{}` returns {declared} value{}, but this returns {actual}",
                        function.name.value,
                        plural(declared)
                    ),
                    ret.context(),
                );
                if let Some(returns) = &function.returns {
                    diagnostic = diagnostic.with_related(Diagnostic::note(
                        "return types declared here",
                        returns.context(),
                    ));
                }
                return Err(diagnostic);
            }
        }
    }
    Ok(())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
