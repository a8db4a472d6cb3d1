use std::path::Path;

use super::*;

#[test]
fn new_record_captures_name_and_extension() {
    let record = FileRecord::new(Path::new("/data/Report.XLSX"));
    assert_eq!(record.name, "Report.XLSX");
    assert_eq!(record.extension.as_deref(), Some("xlsx"));
    assert_eq!(record.integrity_status, IntegrityStatus::Unknown);
    assert!(record.diagnostics.is_empty());
}

#[test]
fn inaccessible_record_has_status_and_note() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let record = FileRecord::inaccessible(Path::new("/data/locked.csv"), &io);
    assert_eq!(record.integrity_status, IntegrityStatus::Inaccessible);
    assert!(record.diagnostics[0].message.contains("access failed"));
}

#[test]
fn timed_out_record_is_unknown() {
    let record = FileRecord::timed_out(Path::new("/data/huge.zip"), 30);
    assert_eq!(record.integrity_status, IntegrityStatus::Unknown);
    assert!(record.diagnostics[0].message.contains("30s"));
}

#[test]
fn unexpected_fault_is_unknown() {
    let record = FileRecord::unexpected_fault(Path::new("/data/odd.bin"), "panic");
    assert_eq!(record.integrity_status, IntegrityStatus::Unknown);
    assert!(record.has_grade(DiagnosticGrade::Unknown));
}

#[test]
fn finalize_applies_worst_grade() {
    let mut record = FileRecord::new(Path::new("a.json"));
    record.diagnostics.push(Diagnostic::info("note"));
    record.finalize();
    assert_eq!(record.integrity_status, IntegrityStatus::Intact);

    record.diagnostics.push(Diagnostic::corrupted("truncated"));
    record.finalize();
    assert_eq!(record.integrity_status, IntegrityStatus::Corrupted);
}

#[test]
fn record_round_trips_through_json() {
    let mut record = FileRecord::new(Path::new("a.txt"));
    record.sha256 = Some("ab".repeat(32));
    record.finalize();

    let json = serde_json::to_string(&record).unwrap();
    let back: FileRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, "a.txt");
    assert_eq!(back.integrity_status, IntegrityStatus::Intact);
}
