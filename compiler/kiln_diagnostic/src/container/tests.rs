use super::*;
use crate::{Context, ErrorCode};
use pretty_assertions::assert_eq;

fn diag(severity: Severity) -> Diagnostic {
    Diagnostic::new(severity, format!("{severity} message"), Context::default())
}

#[test]
fn below_threshold_records_without_escalating() {
    let mut container = DiagnosticContainer::new(Severity::Warning);
    assert_eq!(container.add(diag(Severity::Note)), Ok(()));
    assert_eq!(container.add(diag(Severity::Remark)), Ok(()));
    assert_eq!(container.len(), 2);
    assert_eq!(container.max_severity(), Severity::Remark);
    assert!(!container.has_errors());
}

#[test]
fn at_or_above_threshold_records_and_escalates() {
    let mut container = DiagnosticContainer::new(Severity::Warning);
    assert_eq!(
        container.add(diag(Severity::Warning)),
        Err(Escalation {
            severity: Severity::Warning,
            threshold: Severity::Warning,
        })
    );
    assert!(container.add(diag(Severity::Fatal)).is_err());
    // Escalating diagnostics are still recorded.
    assert_eq!(container.len(), 2);
    assert_eq!(container.max_severity(), Severity::Fatal);
    assert!(container.has_errors());
}

#[test]
fn escalation_direction_across_all_severities() {
    let all = [
        Severity::Ignored,
        Severity::Note,
        Severity::Remark,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];
    for threshold in all {
        let mut container = DiagnosticContainer::new(threshold);
        for severity in all {
            let escalated = container.add(diag(severity)).is_err();
            assert_eq!(
                escalated,
                severity >= threshold,
                "severity {severity} with threshold {threshold}"
            );
        }
        assert_eq!(container.len(), all.len());
    }
}

#[test]
fn merge_appends_and_recomputes_max() {
    let mut left = DiagnosticContainer::new(Severity::Error);
    let _ = left.add(diag(Severity::Note));
    let mut right = DiagnosticContainer::new(Severity::Error);
    let _ = right.add(Diagnostic::error(
        ErrorCode::E3001,
        "unexpected token",
        Context::default(),
    ));
    let _ = right.add(diag(Severity::Warning));

    left.merge(right);
    assert_eq!(left.len(), 3);
    assert_eq!(left.max_severity(), Severity::Error);
    assert_eq!(left.count(Severity::Warning), 1);
    let messages: Vec<&str> = left.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["note message", "unexpected token", "warning message"]
    );
}

#[test]
fn empty_container() {
    let container = DiagnosticContainer::default();
    assert!(container.is_empty());
    assert_eq!(container.threshold(), Severity::Error);
    assert_eq!(container.max_severity(), Severity::Ignored);
    assert!(!container.has_errors());
    assert!(container.into_vec().is_empty());
}
