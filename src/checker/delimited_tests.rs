use std::fs;

use tempfile::tempdir;

use crate::record::DiagnosticGrade;

use super::*;

fn check_content(content: &str) -> CheckOutcome {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, content).unwrap();
    check(&path)
}

#[test]
fn regular_comma_file_is_clean() {
    let outcome = check_content("a,b,c\n1,2,3\n4,5,6\n");
    let Some(CheckFinding::Delimited {
        delimiter,
        rows,
        columns,
        ragged_rows,
        ..
    }) = outcome.finding
    else {
        panic!("expected a delimited finding");
    };
    assert_eq!(delimiter, ',');
    assert_eq!(rows, 3);
    assert_eq!(columns, 3);
    assert_eq!(ragged_rows, 0);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn semicolon_delimiter_is_detected() {
    let outcome = check_content("a;b;c\n1;2;3\n");
    let Some(CheckFinding::Delimited { delimiter, .. }) = outcome.finding else {
        panic!("expected a delimited finding");
    };
    assert_eq!(delimiter, ';');
}

#[test]
fn tab_delimiter_is_detected() {
    let outcome = check_content("a\tb\tc\n1\t2\t3\n");
    let Some(CheckFinding::Delimited { delimiter, .. }) = outcome.finding else {
        panic!("expected a delimited finding");
    };
    assert_eq!(delimiter, '\t');
}

#[test]
fn ragged_rows_are_advisory() {
    let outcome = check_content("a,b,c\n1,2\n3,4,5,6\n");
    let Some(CheckFinding::Delimited { ragged_rows, .. }) = outcome.finding else {
        panic!("expected a delimited finding");
    };
    assert_eq!(ragged_rows, 2);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].grade, DiagnosticGrade::Unknown);
}

#[test]
fn delimiter_detection_samples_a_long_file() {
    // Over 1 KiB so the detector has to cut the sample at a char boundary.
    let mut content = String::from("colá;colé\n");
    for i in 0..200 {
        content.push_str(&format!("{i};vàlue{i}\n"));
    }
    let outcome = check_content(&content);
    let Some(CheckFinding::Delimited { delimiter, .. }) = outcome.finding else {
        panic!("expected a delimited finding");
    };
    assert_eq!(delimiter, ';');
}

#[test]
fn empty_file_has_zero_rows() {
    let outcome = check_content("");
    assert!(matches!(
        outcome.finding,
        Some(CheckFinding::Delimited { rows: 0, .. })
    ));
}
