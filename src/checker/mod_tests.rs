use std::fs;

use tempfile::tempdir;

use crate::deps::Availability;
use crate::record::DiagnosticGrade;

use super::*;

fn ctx_with(size: u64, deps: &DependencyState) -> CheckContext<'_> {
    CheckContext {
        size,
        deps,
        installer: None,
        negotiate: false,
    }
}

#[test]
fn unknown_format_routes_to_generic() {
    let deps = DependencyState::with_availability(Availability::Absent);
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    fs::write(&path, b"").unwrap();

    let outcome = run_checker(FormatTag::Unknown, &path, &ctx_with(0, &deps));
    assert!(matches!(
        outcome.finding,
        Some(CheckFinding::Generic { empty: true, .. })
    ));
    assert_eq!(outcome.diagnostics[0].grade, DiagnosticGrade::Unknown);
}

#[test]
fn json_format_routes_to_json_checker() {
    let deps = DependencyState::with_availability(Availability::Absent);
    let dir = tempdir().unwrap();
    let path = dir.path().join("v.json");
    fs::write(&path, b"[1, 2, 3]").unwrap();

    let outcome = run_checker(FormatTag::Json, &path, &ctx_with(9, &deps));
    assert!(matches!(
        outcome.finding,
        Some(CheckFinding::Json {
            entries: Some(3),
            ..
        })
    ));
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn outcome_push_accumulates() {
    let mut outcome = CheckOutcome::default();
    assert!(outcome.diagnostics.is_empty());
    outcome.push(Diagnostic::info("one"));
    outcome.push(Diagnostic::unknown("two"));
    assert_eq!(outcome.diagnostics.len(), 2);
    assert!(outcome.reclassified.is_none());
}
