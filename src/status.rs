use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{Diagnostic, DiagnosticGrade};

/// Final verdict for one file after the whole pipeline ran.
///
/// These four values (and no others) are surfaced to every external
/// consumer, serialized in SCREAMING_CASE to match the report contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityStatus {
    Intact,
    Corrupted,
    Inaccessible,
    Unknown,
}

impl fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Intact => "INTACT",
            Self::Corrupted => "CORRUPTED",
            Self::Inaccessible => "INACCESSIBLE",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Folds access outcome and graded diagnostics into one status.
///
/// Precedence, first match wins:
/// 1. access failure -> INACCESSIBLE (no content was ever read)
/// 2. any corrupted-grade diagnostic -> CORRUPTED
/// 3. any unknown-grade diagnostic -> UNKNOWN
/// 4. otherwise -> INTACT
#[must_use]
pub fn classify(access_failed: bool, diagnostics: &[Diagnostic]) -> IntegrityStatus {
    if access_failed {
        return IntegrityStatus::Inaccessible;
    }

    let mut saw_unknown = false;
    for diagnostic in diagnostics {
        match diagnostic.grade {
            DiagnosticGrade::Corrupted => return IntegrityStatus::Corrupted,
            DiagnosticGrade::Unknown => saw_unknown = true,
            DiagnosticGrade::Info => {}
        }
    }

    if saw_unknown {
        IntegrityStatus::Unknown
    } else {
        IntegrityStatus::Intact
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
