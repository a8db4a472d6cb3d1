use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checker::CheckFinding;
use crate::format::FormatTag;
use crate::status::{self, IntegrityStatus};

/// Severity of a single diagnostic message.
///
/// Grades drive the status classifier: `Corrupted` dominates `Unknown`,
/// `Info` never affects the final status on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticGrade {
    Info,
    Unknown,
    Corrupted,
}

/// One diagnostic message accumulated while checking a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub grade: DiagnosticGrade,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            grade: DiagnosticGrade::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            grade: DiagnosticGrade::Unknown,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self {
            grade: DiagnosticGrade::Corrupted,
            message: message.into(),
        }
    }
}

/// Everything the pipeline learned about one discovered file.
///
/// A record is owned by exactly one worker until it lands in the report;
/// no two records interact during classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub name: String,
    pub extension: Option<String>,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    /// Octal permission bits on unix, `None` elsewhere.
    pub permissions: Option<String>,
    pub readonly: bool,
    pub sha256: Option<String>,
    pub blake3: Option<String>,
    pub format: FormatTag,
    pub integrity_status: IntegrityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_checks: Option<CheckFinding>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileRecord {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().to_lowercase());

        Self {
            path: path.to_path_buf(),
            name,
            extension,
            size: 0,
            modified: None,
            permissions: None,
            readonly: false,
            sha256: None,
            blake3: None,
            format: FormatTag::Unknown,
            integrity_status: IntegrityStatus::Unknown,
            specific_checks: None,
            diagnostics: Vec::new(),
        }
    }

    /// Record for a file that could not be opened or stat'd at all.
    #[must_use]
    pub fn inaccessible(path: &Path, source: &std::io::Error) -> Self {
        let mut record = Self::new(path);
        record
            .diagnostics
            .push(Diagnostic::info(format!("access failed: {source}")));
        record.integrity_status = status::classify(true, &record.diagnostics);
        record
    }

    /// Record for a file whose pipeline exceeded its time budget.
    #[must_use]
    pub fn timed_out(path: &Path, budget_secs: u64) -> Self {
        let mut record = Self::new(path);
        record.diagnostics.push(Diagnostic::unknown(format!(
            "check abandoned after exceeding the {budget_secs}s per-file budget"
        )));
        record.integrity_status = status::classify(false, &record.diagnostics);
        record
    }

    /// Record for a file whose pipeline raised an unexpected fault.
    #[must_use]
    pub fn unexpected_fault(path: &Path, detail: &str) -> Self {
        let mut record = Self::new(path);
        record
            .diagnostics
            .push(Diagnostic::unknown(format!("unexpected fault: {detail}")));
        record.integrity_status = status::classify(false, &record.diagnostics);
        record
    }

    /// Derives the final status from the record's own diagnostics.
    pub fn finalize(&mut self) {
        self.integrity_status = status::classify(false, &self.diagnostics);
    }

    #[must_use]
    pub fn has_grade(&self, grade: DiagnosticGrade) -> bool {
        self.diagnostics.iter().any(|d| d.grade == grade)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
