use std::fs;
use std::path::Path;

use rustpython_parser::{ast, parse, Mode};

use crate::record::Diagnostic;

use super::{CheckFinding, CheckOutcome};

/// Parses the script into an AST; any syntax fault is corruption-grade.
pub(crate) fn check(path: &Path) -> CheckOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during script check: {e}"
            )));
        }
    };

    // Python 3 sources are UTF-8 by default; anything else cannot parse.
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::corrupted(format!(
                "script is not valid UTF-8: {e}"
            )));
        }
    };

    let lines = source.lines().count();

    match parse(&source, Mode::Module, "<scan>") {
        Ok(module) => {
            let statements = match &module {
                ast::Mod::Module(m) => m.body.len(),
                _ => 0,
            };
            CheckOutcome::with_finding(CheckFinding::Script { lines, statements })
        }
        Err(e) => CheckOutcome::diagnostic_only(Diagnostic::corrupted(format!(
            "Python syntax error: {e}"
        ))),
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
