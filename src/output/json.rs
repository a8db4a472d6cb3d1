use crate::error::Result;
use crate::report::ScanReport;

use super::ReportFormatter;

/// Renders the report as pretty-printed JSON, the machine-readable
/// contract for downstream tooling.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
