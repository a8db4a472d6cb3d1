use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::format::PDF_SIGNATURE;
use crate::record::Diagnostic;

use super::{CheckFinding, CheckOutcome};

/// Bytes inspected at the end of the file for structural landmarks.
const TAIL_SIZE: u64 = 1024;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

/// Signature plus minimal structural landmarks; not a full PDF parse.
pub(crate) fn check(path: &Path) -> CheckOutcome {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during PDF check: {e}"
            )));
        }
    };

    let mut header = [0u8; 16];
    let header_len = match file.read(&mut header) {
        Ok(n) => n,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during PDF check: {e}"
            )));
        }
    };

    if !header[..header_len].starts_with(PDF_SIGNATURE) {
        return CheckOutcome::diagnostic_only(Diagnostic::corrupted(
            "missing %PDF- signature",
        ));
    }

    let version = header[PDF_SIGNATURE.len()..header_len]
        .split(|b| b.is_ascii_whitespace())
        .next()
        .filter(|v| !v.is_empty())
        .map(|v| String::from_utf8_lossy(v).into_owned());

    let size = file.seek(SeekFrom::End(0)).unwrap_or(0);
    let tail_start = size.saturating_sub(TAIL_SIZE);
    let mut tail = Vec::new();
    let tail_ok = file
        .seek(SeekFrom::Start(tail_start))
        .and_then(|_| file.read_to_end(&mut tail))
        .is_ok();

    let has_eof_marker = tail_ok && contains(&tail, b"%%EOF");
    let has_xref = tail_ok && (contains(&tail, b"startxref") || contains(&tail, b"xref"));

    let mut outcome = CheckOutcome::with_finding(CheckFinding::Pdf {
        version,
        has_eof_marker,
        has_xref,
    });

    // A valid signature with missing landmarks is suspicious but not
    // provably corrupt: incremental updates and xref streams vary.
    if !has_eof_marker || !has_xref {
        outcome.push(Diagnostic::unknown(
            "trailer landmarks (%%EOF / xref) not found near end of file",
        ));
    }

    outcome
}

#[cfg(test)]
#[path = "pdf_tests.rs"]
mod tests;
