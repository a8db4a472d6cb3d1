use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::format::FormatTag;
use crate::record::FileRecord;
use crate::status::IntegrityStatus;

/// Per-status tallies over a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub intact: usize,
    pub corrupted: usize,
    pub inaccessible: usize,
    pub unknown: usize,
}

impl StatusSummary {
    pub fn count(&mut self, status: IntegrityStatus) {
        self.total += 1;
        match status {
            IntegrityStatus::Intact => self.intact += 1,
            IntegrityStatus::Corrupted => self.corrupted += 1,
            IntegrityStatus::Inaccessible => self.inaccessible += 1,
            IntegrityStatus::Unknown => self.unknown += 1,
        }
    }

    /// Share of the total, one decimal; 0.0 on an empty scan.
    #[must_use]
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = count as f64 / self.total as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }

    /// True when any file needs attention.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.corrupted > 0 || self.inaccessible > 0 || self.unknown > 0
    }
}

/// Complete result of one scan run. Serialized as-is by the JSON writer;
/// the other writers flatten it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: StatusSummary,
    /// Counts per format tag, in first-seen order.
    pub format_counts: IndexMap<FormatTag, usize>,
    pub files: Vec<FileRecord>,
}

impl ScanReport {
    /// Builds the report from finished records, tallying as it goes.
    #[must_use]
    pub fn from_records(
        files: Vec<FileRecord>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut summary = StatusSummary::default();
        let mut format_counts: IndexMap<FormatTag, usize> = IndexMap::new();
        for record in &files {
            summary.count(record.integrity_status);
            *format_counts.entry(record.format).or_insert(0) += 1;
        }

        Self {
            started_at,
            finished_at,
            summary,
            format_counts,
            files,
        }
    }

    /// Records with the given status, in scan order.
    pub fn with_status(&self, status: IntegrityStatus) -> impl Iterator<Item = &FileRecord> {
        self.files
            .iter()
            .filter(move |record| record.integrity_status == status)
    }
}

/// Timestamped default report file stem, e.g.
/// `integrity_report_20260826_143015`.
#[must_use]
pub fn default_report_stem(now: DateTime<Utc>) -> String {
    format!("integrity_report_{}", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
