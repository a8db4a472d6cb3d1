use crate::record::DiagnosticGrade;

use super::*;

#[test]
fn non_empty_file_is_clean() {
    let outcome = check(1024);
    assert!(matches!(
        outcome.finding,
        Some(CheckFinding::Generic {
            readable: true,
            empty: false,
        })
    ));
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn zero_byte_file_cannot_be_verified() {
    let outcome = check(0);
    assert!(matches!(
        outcome.finding,
        Some(CheckFinding::Generic { empty: true, .. })
    ));
    assert_eq!(outcome.diagnostics[0].grade, DiagnosticGrade::Unknown);
}
