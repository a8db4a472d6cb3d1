mod container;
#[cfg(feature = "advanced-spreadsheet")]
mod engine;
#[cfg(test)]
pub(crate) mod testutil;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checker::{CheckContext, CheckFinding, CheckOutcome};
use crate::deps::Capability;
use crate::format::FormatTag;
use crate::record::Diagnostic;

/// Container family detected from the file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Zip-family container (modern workbook).
    Zip,
    /// OLE compound file (legacy binary workbook).
    LegacyCfb,
    /// Neither known workbook container.
    Other,
}

/// Granularity reached during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    /// Container integrity and sheet names only.
    Basic,
    /// Full cell-level statistics.
    Advanced,
    /// Every engine attempt failed.
    Failed,
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Engine that produced the advanced statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    Primary,
    StyleFree,
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetFinding {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub cells: usize,
    pub missing_cells: usize,
    /// Percentage in [0, 100], rounded to one decimal; 0.0 for a sheet
    /// with zero cells.
    pub missing_percentage: f64,
    pub column_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetFinding {
    pub container: ContainerKind,
    pub verification_level: VerificationLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineKind>,
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetFinding>,
}

/// Missing-cell percentage, one decimal, never a division by zero.
#[must_use]
pub fn missing_percentage(missing: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = missing as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Inferred type of one cell, merged per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellKind {
    Empty,
    Number,
    Text,
    Bool,
    DateTime,
    Error,
    Mixed,
}

impl CellKind {
    pub(crate) fn merge(column: &mut Self, cell: Self) {
        if cell == Self::Empty {
            return;
        }
        if *column == Self::Empty {
            *column = cell;
        } else if *column != cell {
            *column = Self::Mixed;
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Number => "number",
            Self::Text => "text",
            Self::Bool => "boolean",
            Self::DateTime => "datetime",
            Self::Error => "error",
            Self::Mixed => "mixed",
        }
    }
}

/// One parsing strategy in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attempt {
    Primary,
    StylesDisabled,
    LegacyReader,
}

impl Attempt {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary engine",
            Self::StylesDisabled => "style-free engine",
            Self::LegacyReader => "legacy engine",
        }
    }
}

/// Category of an engine fault; drives the fallback transition and the
/// grade assigned on exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FaultClass {
    /// Not a valid zip container.
    Container,
    /// Style or theme part failed to parse.
    Styles,
    Other,
}

#[derive(Debug)]
pub(crate) struct EngineFault {
    pub class: FaultClass,
    pub message: String,
}

/// The fallback chain as an explicit transition table: a styles fault
/// retries without style processing, a container fault retries with the
/// legacy reader, everything else is terminal.
pub(crate) const fn next_attempt(attempt: Attempt, fault: FaultClass) -> Option<Attempt> {
    match (attempt, fault) {
        (Attempt::Primary, FaultClass::Styles) => Some(Attempt::StylesDisabled),
        (Attempt::Primary, FaultClass::Container) => Some(Attempt::LegacyReader),
        _ => None,
    }
}

/// Deep analysis entry point for both workbook format tags.
#[must_use]
pub fn analyze(path: &Path, claimed: FormatTag, ctx: &CheckContext<'_>) -> CheckOutcome {
    let kind = match container::read_signature(path) {
        Ok(kind) => kind,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during spreadsheet check: {e}"
            )));
        }
    };

    let mut outcome = CheckOutcome::default();
    let mut effective = claimed;

    // A renamed legacy workbook can lie about its tag; re-verify before
    // ever handing the file to the modern parser.
    if claimed == FormatTag::SpreadsheetXlsx && kind == ContainerKind::LegacyCfb {
        outcome.push(Diagnostic::unknown(
            "legacy binary workbook renamed to the modern extension",
        ));
        outcome.reclassified = Some(FormatTag::SpreadsheetLegacy);
        effective = FormatTag::SpreadsheetLegacy;
    }

    let availability = if ctx.negotiate {
        ctx.deps
            .negotiate(Capability::AdvancedSpreadsheet, ctx.installer)
    } else {
        ctx.deps.availability(Capability::AdvancedSpreadsheet)
    };

    #[cfg(feature = "advanced-spreadsheet")]
    if availability == crate::deps::Availability::Present {
        return advanced(path, effective, kind, outcome);
    }

    let _ = availability;
    basic(path, effective, kind, outcome)
}

/// Reduced-capability path: container integrity plus sheet names. Not a
/// failure; the record stays eligible for INTACT.
fn basic(
    path: &Path,
    _effective: FormatTag,
    kind: ContainerKind,
    mut outcome: CheckOutcome,
) -> CheckOutcome {
    let finding = match kind {
        ContainerKind::Zip => match container::enumerate_sheet_names(path) {
            Ok(sheet_names) => SpreadsheetFinding {
                container: kind,
                verification_level: VerificationLevel::Basic,
                engine: None,
                sheet_names,
                sheets: Vec::new(),
            },
            Err(container::BasicFault::Container(detail)) => {
                outcome.push(Diagnostic::corrupted(format!(
                    "not a valid zip container: {detail}"
                )));
                failed_finding(kind)
            }
            Err(container::BasicFault::Workbook(detail)) => {
                outcome.push(Diagnostic::unknown(format!(
                    "workbook part unreadable: {detail}"
                )));
                failed_finding(kind)
            }
        },
        ContainerKind::LegacyCfb => {
            outcome.push(Diagnostic::info(
                "legacy container verified by signature only",
            ));
            SpreadsheetFinding {
                container: kind,
                verification_level: VerificationLevel::Basic,
                engine: None,
                sheet_names: Vec::new(),
                sheets: Vec::new(),
            }
        }
        ContainerKind::Other => {
            outcome.push(Diagnostic::corrupted(
                "signature matches no known workbook container",
            ));
            failed_finding(kind)
        }
    };

    outcome.finding = Some(CheckFinding::Spreadsheet(finding));
    outcome
}

fn failed_finding(kind: ContainerKind) -> SpreadsheetFinding {
    SpreadsheetFinding {
        container: kind,
        verification_level: VerificationLevel::Failed,
        engine: None,
        sheet_names: Vec::new(),
        sheets: Vec::new(),
    }
}

/// Full cell-level analysis, walking the fallback chain until an engine
/// succeeds or the chain is exhausted.
#[cfg(feature = "advanced-spreadsheet")]
fn advanced(
    path: &Path,
    effective: FormatTag,
    kind: ContainerKind,
    mut outcome: CheckOutcome,
) -> CheckOutcome {
    let initial = if effective == FormatTag::SpreadsheetLegacy {
        Attempt::LegacyReader
    } else {
        Attempt::Primary
    };

    let mut attempt = initial;
    let mut faults: Vec<(Attempt, EngineFault)> = Vec::new();

    loop {
        match engine::run(attempt, path) {
            Ok(output) => {
                if attempt == Attempt::StylesDisabled {
                    outcome.push(Diagnostic::info(
                        "style information was suppressed to complete the parse",
                    ));
                }
                if attempt == Attempt::LegacyReader && effective == FormatTag::SpreadsheetXlsx {
                    outcome.push(Diagnostic::unknown(
                        "parsed with the legacy engine despite the modern extension",
                    ));
                    outcome.reclassified = Some(FormatTag::SpreadsheetLegacy);
                }
                outcome.finding = Some(CheckFinding::Spreadsheet(SpreadsheetFinding {
                    container: kind,
                    verification_level: VerificationLevel::Advanced,
                    engine: Some(output.engine),
                    sheet_names: output.sheet_names,
                    sheets: output.sheets,
                }));
                return outcome;
            }
            Err(fault) => {
                let next = next_attempt(attempt, fault.class);
                faults.push((attempt, fault));
                match next {
                    Some(n) => attempt = n,
                    None => break,
                }
            }
        }
    }

    // Exhaustion: every attempt's diagnostic is recorded, and the last
    // fault category decides the grade (container fault -> corrupted).
    // A file matching no known container signature is graded corrupted
    // regardless, same as the reduced-capability path.
    let last_class = if kind == ContainerKind::Other {
        FaultClass::Container
    } else {
        faults
            .last()
            .map_or(FaultClass::Other, |(_, fault)| fault.class)
    };
    let count = faults.len();
    for (i, (attempt, fault)) in faults.iter().enumerate() {
        let message = format!(
            "engine attempt {} ({}) failed: {}",
            i + 1,
            attempt.label(),
            fault.message
        );
        if i + 1 == count {
            let diagnostic = match last_class {
                FaultClass::Container => Diagnostic::corrupted(message),
                FaultClass::Styles | FaultClass::Other => Diagnostic::unknown(message),
            };
            outcome.push(diagnostic);
        } else {
            outcome.push(Diagnostic::info(message));
        }
    }

    outcome.finding = Some(CheckFinding::Spreadsheet(failed_finding(kind)));
    outcome
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
