//! Accumulation of diagnostics with a reporting threshold.

use crate::{Diagnostic, Severity};

/// Signal returned by [`DiagnosticContainer::add`] when a diagnostic reaches
/// the container's threshold.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("{severity} reached the reporting threshold ({threshold})")]
pub struct Escalation {
    pub severity: Severity,
    pub threshold: Severity,
}

/// Collects diagnostics and tracks the highest severity seen.
///
/// Every diagnostic is recorded. Only those at or above `threshold` escalate,
/// so notes and remarks accumulate silently while errors trip failure.
#[derive(Clone, Debug)]
pub struct DiagnosticContainer {
    threshold: Severity,
    max: Severity,
    diagnostics: Vec<Diagnostic>,
}

impl Default for DiagnosticContainer {
    fn default() -> Self {
        Self::new(Severity::Error)
    }
}

impl DiagnosticContainer {
    pub fn new(threshold: Severity) -> Self {
        DiagnosticContainer {
            threshold,
            max: Severity::Ignored,
            diagnostics: Vec::new(),
        }
    }

    /// Record `diagnostic`; escalate if its severity is at or above the threshold.
    pub fn add(&mut self, diagnostic: Diagnostic) -> Result<(), Escalation> {
        let severity = diagnostic.severity;
        self.max = self.max.max(severity);
        self.diagnostics.push(diagnostic);
        if severity >= self.threshold {
            return Err(Escalation {
                severity,
                threshold: self.threshold,
            });
        }
        Ok(())
    }

    /// Append every diagnostic of `other` and recompute the maximum severity.
    pub fn merge(&mut self, other: DiagnosticContainer) {
        self.diagnostics.extend(other.diagnostics);
        self.max = self
            .diagnostics
            .iter()
            .map(|d| d.severity)
            .max()
            .unwrap_or_default();
    }

    #[inline]
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Highest severity recorded so far, `Ignored` when empty.
    #[inline]
    pub fn max_severity(&self) -> Severity {
        self.max
    }

    /// Whether anything at or above the threshold has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty() && self.max >= self.threshold
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a DiagnosticContainer {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
