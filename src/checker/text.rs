use std::fs;
use std::path::Path;

use crate::record::Diagnostic;

use super::{CheckFinding, CheckOutcome};

/// Encodings attempted in order; the first clean decode wins. Windows-1252
/// accepts every byte value, so it doubles as the legacy catch-all the
/// original tool reached through latin1/cp1252/iso-8859-1.
const ENCODINGS: &[&encoding_rs::Encoding] = &[encoding_rs::UTF_8, encoding_rs::WINDOWS_1252];

/// Decodes bytes with the fixed encoding list. Returns the text and the
/// encoding label, or `None` when nothing decodes cleanly.
pub(crate) fn decode_ordered(bytes: &[u8]) -> Option<(String, &'static str)> {
    for encoding in ENCODINGS {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Some((text.into_owned(), encoding.name()));
        }
    }
    None
}

pub(crate) fn check(path: &Path) -> CheckOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during text check: {e}"
            )));
        }
    };

    let Some((text, encoding)) = decode_ordered(&bytes) else {
        return CheckOutcome::diagnostic_only(Diagnostic::corrupted(
            "content does not decode with any supported encoding",
        ));
    };

    CheckOutcome::with_finding(CheckFinding::Text {
        encoding: encoding.to_string(),
        lines: text.lines().count(),
        characters: text.chars().count(),
    })
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
