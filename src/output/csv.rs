use crate::error::{Result, VeriscanError};
use crate::record::FileRecord;
use crate::report::ScanReport;

use super::ReportFormatter;

/// Renders one row per file with the nested finding flattened away;
/// spreadsheet-friendly counterpart of the JSON report.
pub struct CsvFormatter;

const HEADER: [&str; 11] = [
    "path",
    "name",
    "extension",
    "format",
    "status",
    "size",
    "modified",
    "permissions",
    "sha256",
    "blake3",
    "diagnostics",
];

fn row(record: &FileRecord) -> [String; 11] {
    let diagnostics = record
        .diagnostics
        .iter()
        .map(|d| d.message.clone())
        .collect::<Vec<_>>()
        .join("; ");

    [
        record.path.display().to_string(),
        record.name.clone(),
        record.extension.clone().unwrap_or_default(),
        record.format.to_string(),
        record.integrity_status.to_string(),
        record.size.to_string(),
        record
            .modified
            .map(|m| m.to_rfc3339())
            .unwrap_or_default(),
        record.permissions.clone().unwrap_or_default(),
        record.sha256.clone().unwrap_or_default(),
        record.blake3.clone().unwrap_or_default(),
        diagnostics,
    ]
}

impl ReportFormatter for CsvFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for record in &report.files {
            writer.write_record(row(record))?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| VeriscanError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&data).to_string())
    }
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
