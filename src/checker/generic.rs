use crate::record::Diagnostic;

use super::{CheckFinding, CheckOutcome};

/// Minimal validator for unrecognized formats: the file was already read
/// by the hasher, so the only structural signal left is non-zero size.
pub(crate) fn check(size: u64) -> CheckOutcome {
    let empty = size == 0;
    let mut outcome = CheckOutcome::with_finding(CheckFinding::Generic {
        readable: true,
        empty,
    });

    if empty {
        outcome.push(Diagnostic::unknown(
            "zero-byte file of unrecognized format",
        ));
    }

    outcome
}

#[cfg(test)]
#[path = "generic_tests.rs"]
mod tests;
