use std::path::Path;

use chrono::TimeZone;

use crate::record::Diagnostic;

use super::*;

fn record(name: &str, status: IntegrityStatus) -> FileRecord {
    let mut record = FileRecord::new(Path::new(name));
    match status {
        IntegrityStatus::Intact => {}
        IntegrityStatus::Corrupted => record.diagnostics.push(Diagnostic::corrupted("bad")),
        IntegrityStatus::Unknown => record.diagnostics.push(Diagnostic::unknown("odd")),
        IntegrityStatus::Inaccessible => {
            record.integrity_status = IntegrityStatus::Inaccessible;
            return record;
        }
    }
    record.finalize();
    record
}

#[test]
fn summary_counts_every_status() {
    let mut summary = StatusSummary::default();
    summary.count(IntegrityStatus::Intact);
    summary.count(IntegrityStatus::Intact);
    summary.count(IntegrityStatus::Corrupted);
    summary.count(IntegrityStatus::Unknown);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.intact, 2);
    assert_eq!(summary.corrupted, 1);
    assert_eq!(summary.inaccessible, 0);
    assert_eq!(summary.unknown, 1);
}

#[test]
fn percentage_is_rounded_to_one_decimal() {
    let summary = StatusSummary {
        total: 3,
        intact: 1,
        corrupted: 2,
        inaccessible: 0,
        unknown: 0,
    };
    assert!((summary.percentage(1) - 33.3).abs() < f64::EPSILON);
    assert!((summary.percentage(2) - 66.7).abs() < f64::EPSILON);
}

#[test]
fn empty_scan_has_zero_percentages_and_no_issues() {
    let summary = StatusSummary::default();
    assert!((summary.percentage(0) - 0.0).abs() < f64::EPSILON);
    assert!(!summary.has_issues());
}

#[test]
fn has_issues_for_any_problem_status() {
    for status in [
        IntegrityStatus::Corrupted,
        IntegrityStatus::Inaccessible,
        IntegrityStatus::Unknown,
    ] {
        let mut summary = StatusSummary::default();
        summary.count(status);
        assert!(summary.has_issues(), "{status} should count as an issue");
    }
}

#[test]
fn from_records_tallies_statuses_and_formats() {
    let now = Utc::now();
    let mut corrupt = record("a.json", IntegrityStatus::Corrupted);
    corrupt.format = FormatTag::Json;
    let mut intact = record("b.csv", IntegrityStatus::Intact);
    intact.format = FormatTag::Csv;
    let mut intact2 = record("c.csv", IntegrityStatus::Intact);
    intact2.format = FormatTag::Csv;

    let report = ScanReport::from_records(vec![corrupt, intact, intact2], now, now);
    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.corrupted, 1);
    assert_eq!(report.format_counts[&FormatTag::Csv], 2);
    assert_eq!(report.format_counts[&FormatTag::Json], 1);
    assert_eq!(report.with_status(IntegrityStatus::Intact).count(), 2);
}

#[test]
fn report_stem_is_timestamped() {
    let at = Utc.with_ymd_and_hms(2026, 8, 26, 14, 30, 15).unwrap();
    assert_eq!(
        default_report_stem(at),
        "integrity_report_20260826_143015"
    );
}
