use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::record::Diagnostic;

use super::{CheckFinding, CheckOutcome};

pub(crate) fn check(path: &Path) -> CheckOutcome {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during JSON check: {e}"
            )));
        }
    };

    // Full-document parse: any fault here is corruption-grade.
    match serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)) {
        Ok(value) => {
            let (value_kind, entries) = match &value {
                serde_json::Value::Object(map) => ("object", Some(map.len())),
                serde_json::Value::Array(items) => ("array", Some(items.len())),
                serde_json::Value::String(_) => ("string", None),
                serde_json::Value::Number(_) => ("number", None),
                serde_json::Value::Bool(_) => ("boolean", None),
                serde_json::Value::Null => ("null", None),
            };
            CheckOutcome::with_finding(CheckFinding::Json {
                value_kind: value_kind.to_string(),
                entries,
            })
        }
        Err(e) => CheckOutcome::diagnostic_only(Diagnostic::corrupted(format!(
            "invalid JSON document: {e}"
        ))),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
