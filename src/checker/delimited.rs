use std::fs;
use std::path::Path;

use crate::record::Diagnostic;

use super::text::decode_ordered;
use super::{CheckFinding, CheckOutcome};

/// Candidate delimiters, most common first. Comma wins ties.
const DELIMITERS: &[char] = &[',', ';', '\t', '|'];

/// Bytes of text sampled for delimiter detection.
const SAMPLE_SIZE: usize = 1024;

fn detect_delimiter(sample: &str) -> char {
    let mut best = ',';
    let mut best_count = sample.matches(best).count();
    for &candidate in &DELIMITERS[1..] {
        let count = sample.matches(candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

pub(crate) fn check(path: &Path) -> CheckOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during delimited check: {e}"
            )));
        }
    };

    let Some((text, encoding)) = decode_ordered(&bytes) else {
        return CheckOutcome::diagnostic_only(Diagnostic::corrupted(
            "content does not decode with any supported encoding",
        ));
    };

    let sample = if text.len() <= SAMPLE_SIZE {
        text.as_str()
    } else {
        let mut end = SAMPLE_SIZE;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    };
    let delimiter = detect_delimiter(sample);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut outcome = CheckOutcome::default();
    let mut rows = 0usize;
    let mut columns = 0usize;
    let mut ragged_rows = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) => {
                if rows == 0 {
                    columns = record.len();
                } else if record.len() != columns {
                    ragged_rows += 1;
                }
                rows += 1;
            }
            Err(e) => {
                outcome.push(Diagnostic::unknown(format!(
                    "malformed row {}: {e}",
                    rows + 1
                )));
                break;
            }
        }
    }

    if ragged_rows > 0 {
        // Structural inconsistency is advisory, never corruption on its own.
        outcome.push(Diagnostic::unknown(format!(
            "{ragged_rows} row(s) have a column count different from the first row"
        )));
    }

    outcome.finding = Some(CheckFinding::Delimited {
        delimiter,
        encoding: encoding.to_string(),
        rows,
        columns,
        ragged_rows,
    });
    outcome
}

#[cfg(test)]
#[path = "delimited_tests.rs"]
mod tests;
