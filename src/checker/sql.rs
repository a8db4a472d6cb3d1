use std::fs;
use std::path::Path;

use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::record::Diagnostic;

use super::text::decode_ordered;
use super::{CheckFinding, CheckOutcome};

/// Statement-level parse with the generic dialect. SQL dialects vary too
/// much for this to be authoritative, so a parse fault is advisory.
pub(crate) fn check(path: &Path) -> CheckOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during SQL check: {e}"
            )));
        }
    };

    let Some((text, _)) = decode_ordered(&bytes) else {
        return CheckOutcome::diagnostic_only(Diagnostic::corrupted(
            "content does not decode with any supported encoding",
        ));
    };

    let lines = text.lines().count();

    match Parser::parse_sql(&GenericDialect {}, &text) {
        Ok(statements) => CheckOutcome::with_finding(CheckFinding::Sql {
            lines,
            statements: statements.len(),
        }),
        Err(e) => {
            let mut outcome = CheckOutcome::with_finding(CheckFinding::Sql {
                lines,
                statements: 0,
            });
            outcome.push(Diagnostic::unknown(format!(
                "statement did not parse with the generic dialect (advisory): {e}"
            )));
            outcome
        }
    }
}

#[cfg(test)]
#[path = "sql_tests.rs"]
mod tests;
