use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Zip local-file header, shared by archives and modern workbooks.
pub const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
/// OLE compound-file header used by legacy binary workbooks.
pub const LEGACY_CFB_SIGNATURE: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";
pub const RAR_SIGNATURE: &[u8] = b"Rar!\x1A\x07";

/// Which validator applies to a file.
///
/// A fixed enumeration rather than an open registry: adding a format is a
/// compile-time-checked change to the checker dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatTag {
    SpreadsheetXlsx,
    SpreadsheetLegacy,
    Csv,
    Json,
    Pdf,
    Xml,
    Archive,
    ScriptPython,
    Sql,
    PlainText,
    Unknown,
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SpreadsheetXlsx => "spreadsheet-xlsx",
            Self::SpreadsheetLegacy => "spreadsheet-legacy",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Pdf => "pdf",
            Self::Xml => "xml",
            Self::Archive => "archive",
            Self::ScriptPython => "script-python",
            Self::Sql => "sql",
            Self::PlainText => "plain-text",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Maps a lowercase extension to a format tag.
#[must_use]
pub fn from_extension(extension: &str) -> Option<FormatTag> {
    let tag = match extension {
        "xlsx" | "xlsm" => FormatTag::SpreadsheetXlsx,
        "xls" => FormatTag::SpreadsheetLegacy,
        "csv" | "tsv" => FormatTag::Csv,
        "json" => FormatTag::Json,
        "pdf" => FormatTag::Pdf,
        "xml" => FormatTag::Xml,
        "zip" | "rar" => FormatTag::Archive,
        "py" => FormatTag::ScriptPython,
        "sql" => FormatTag::Sql,
        "txt" | "log" | "md" => FormatTag::PlainText,
        _ => return None,
    };
    Some(tag)
}

/// Guesses a format from leading bytes.
///
/// Fallback for missing or unrecognized extensions only; a recognized
/// extension always wins. A zip signature maps to `Archive` here because a
/// bare container says nothing about workbook content; the spreadsheet
/// analyzer re-verifies signatures independently for files whose name
/// claims a workbook format.
#[must_use]
pub fn sniff(head: &[u8]) -> Option<FormatTag> {
    if head.starts_with(PDF_SIGNATURE) {
        return Some(FormatTag::Pdf);
    }
    if head.starts_with(&ZIP_SIGNATURE) || head.starts_with(RAR_SIGNATURE) {
        return Some(FormatTag::Archive);
    }
    if head.starts_with(&LEGACY_CFB_SIGNATURE) {
        return Some(FormatTag::SpreadsheetLegacy);
    }
    if head.starts_with(b"<?xml") {
        return Some(FormatTag::Xml);
    }
    if !head.is_empty() && std::str::from_utf8(head).is_ok() {
        return Some(FormatTag::PlainText);
    }
    None
}

/// Pure classification from a file name plus an optional content sample.
#[must_use]
pub fn classify(path: &Path, head: Option<&[u8]>) -> FormatTag {
    let by_extension = path
        .extension()
        .map(|s| s.to_string_lossy().to_lowercase())
        .and_then(|ext| from_extension(&ext));

    if let Some(tag) = by_extension {
        return tag;
    }

    head.and_then(sniff).unwrap_or(FormatTag::Unknown)
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
