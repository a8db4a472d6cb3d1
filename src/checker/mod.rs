mod archive;
mod delimited;
mod finding;
mod generic;
mod json;
mod pdf;
mod script;
mod sql;
mod text;
mod xml;

pub use finding::{ArchiveKind, CheckFinding};

use std::path::Path;

use crate::deps::{DependencyInstaller, DependencyState};
use crate::format::FormatTag;
use crate::record::Diagnostic;
use crate::spreadsheet;

/// What a validator learned about one file.
///
/// Validators never propagate faults: every internal parse failure is
/// converted into a graded diagnostic here so one bad file cannot abort
/// the batch.
#[derive(Default)]
pub struct CheckOutcome {
    pub finding: Option<CheckFinding>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when deep analysis proves the classifier's tag wrong
    /// (e.g. a legacy workbook renamed to the modern extension).
    pub reclassified: Option<FormatTag>,
}

impl CheckOutcome {
    #[must_use]
    pub fn with_finding(finding: CheckFinding) -> Self {
        Self {
            finding: Some(finding),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn diagnostic_only(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Self::default()
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Shared read-only context handed to validators.
pub struct CheckContext<'a> {
    pub size: u64,
    pub deps: &'a DependencyState,
    pub installer: Option<&'a dyn DependencyInstaller>,
    /// Whether the spreadsheet analyzer may invoke the installer when the
    /// advanced engine is absent.
    pub negotiate: bool,
}

/// Routes a file to the validator matching its format tag.
///
/// The match is exhaustive on purpose: a new `FormatTag` variant fails to
/// compile until it is given a validator.
#[must_use]
pub fn run_checker(tag: FormatTag, path: &Path, ctx: &CheckContext<'_>) -> CheckOutcome {
    match tag {
        FormatTag::SpreadsheetXlsx | FormatTag::SpreadsheetLegacy => {
            spreadsheet::analyze(path, tag, ctx)
        }
        FormatTag::Csv => delimited::check(path),
        FormatTag::Json => json::check(path),
        FormatTag::Pdf => pdf::check(path),
        FormatTag::Xml => xml::check(path),
        FormatTag::Archive => archive::check(path),
        FormatTag::ScriptPython => script::check(path),
        FormatTag::Sql => sql::check(path),
        FormatTag::PlainText => text::check(path),
        FormatTag::Unknown => generic::check(ctx.size),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
