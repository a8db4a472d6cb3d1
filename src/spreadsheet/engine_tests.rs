use std::fs;
use std::path::PathBuf;

use tempfile::{tempdir, TempDir};

use crate::spreadsheet::testutil::minimal_xlsx;

use super::*;

fn write_file(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    (dir, path)
}

#[test]
fn primary_engine_reads_the_workbook() {
    let (_dir, path) = write_file("book.xlsx", &minimal_xlsx());
    let output = run(Attempt::Primary, &path).ok().unwrap();

    assert_eq!(output.engine, EngineKind::Primary);
    assert_eq!(output.sheet_names, vec!["Data".to_string()]);

    let sheet = &output.sheets[0];
    assert_eq!(sheet.rows, 3);
    assert_eq!(sheet.columns, 2);
    assert_eq!(sheet.missing_cells, 1);
}

#[test]
fn primary_engine_reports_a_container_fault_on_garbage() {
    let (_dir, path) = write_file("fake.xlsx", b"definitely not a workbook");
    let fault = run(Attempt::Primary, &path).err().unwrap();
    assert_eq!(fault.class, FaultClass::Container);
}

#[test]
fn style_free_engine_matches_the_primary_counts() {
    let (_dir, path) = write_file("book.xlsx", &minimal_xlsx());
    let output = run(Attempt::StylesDisabled, &path).ok().unwrap();

    assert_eq!(output.engine, EngineKind::StyleFree);
    assert_eq!(output.sheets[0].missing_cells, 1);
    assert_eq!(output.sheets[0].cells, 6);
}

#[test]
fn legacy_engine_refuses_a_zip_container() {
    let (_dir, path) = write_file("book.xls", &minimal_xlsx());
    let fault = run(Attempt::LegacyReader, &path).err().unwrap();
    assert_eq!(fault.class, FaultClass::Other);
}
