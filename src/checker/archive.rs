use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::format::RAR_SIGNATURE;
use crate::record::Diagnostic;

use super::{ArchiveKind, CheckFinding, CheckOutcome};

fn is_rar(path: &Path) -> bool {
    path.extension()
        .map(|s| s.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ext == "rar")
}

/// RAR support is signature-level only; there is no container walk.
fn check_rar(path: &Path) -> CheckOutcome {
    let mut header = [0u8; 8];
    let read = File::open(path).and_then(|mut f| f.read(&mut header));
    let n = match read {
        Ok(n) => n,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during archive check: {e}"
            )));
        }
    };

    if !header[..n].starts_with(RAR_SIGNATURE) {
        return CheckOutcome::diagnostic_only(Diagnostic::corrupted(
            "missing RAR signature",
        ));
    }

    let mut outcome = CheckOutcome::with_finding(CheckFinding::Archive {
        kind: ArchiveKind::Rar,
        entries: 0,
        failed_entry: None,
    });
    outcome.push(Diagnostic::info(
        "RAR verified by signature only; entries were not enumerated",
    ));
    outcome
}

/// Container integrity test: the central directory must parse and every
/// entry must decompress with a matching checksum.
fn check_zip(path: &Path) -> CheckOutcome {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::unknown(format!(
                "read failed during archive check: {e}"
            )));
        }
    };

    let mut archive = match zip::ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(e) => {
            return CheckOutcome::diagnostic_only(Diagnostic::corrupted(format!(
                "not a valid zip container: {e}"
            )));
        }
    };

    let entries = archive.len();
    let mut failed_entry: Option<String> = None;
    let mut failure: Option<String> = None;

    for index in 0..entries {
        let result = archive.by_index(index).and_then(|mut entry| {
            let name = entry.name().to_string();
            io::copy(&mut entry, &mut io::sink())
                .map(|_| ())
                .map_err(|e| zip::result::ZipError::Io(e))?;
            Ok(name)
        });
        if let Err(e) = result {
            failed_entry = archive
                .by_index(index)
                .ok()
                .map(|entry| entry.name().to_string());
            failure = Some(e.to_string());
            break;
        }
    }

    let mut outcome = CheckOutcome::with_finding(CheckFinding::Archive {
        kind: ArchiveKind::Zip,
        entries,
        failed_entry: failed_entry.clone(),
    });

    if let Some(detail) = failure {
        let entry = failed_entry.unwrap_or_else(|| "<unnamed>".to_string());
        outcome.push(Diagnostic::corrupted(format!(
            "archive entry '{entry}' failed integrity test: {detail}"
        )));
    }

    outcome
}

pub(crate) fn check(path: &Path) -> CheckOutcome {
    if is_rar(path) {
        check_rar(path)
    } else {
        check_zip(path)
    }
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
