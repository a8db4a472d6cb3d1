use serde::{Deserialize, Serialize};

use crate::spreadsheet::SpreadsheetFinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveKind {
    Zip,
    Rar,
}

/// Format-specific result attached to one file record.
///
/// Tagged so report consumers can tell which validator produced it
/// without inspecting the file name again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum CheckFinding {
    Delimited {
        delimiter: char,
        encoding: String,
        rows: usize,
        columns: usize,
        /// Rows whose column count differs from the first row.
        ragged_rows: usize,
    },
    Json {
        value_kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        entries: Option<usize>,
    },
    Xml {
        #[serde(skip_serializing_if = "Option::is_none")]
        root_element: Option<String>,
        elements: usize,
    },
    Pdf {
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<String>,
        has_eof_marker: bool,
        has_xref: bool,
    },
    Archive {
        kind: ArchiveKind,
        entries: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        failed_entry: Option<String>,
    },
    Script {
        lines: usize,
        statements: usize,
    },
    Sql {
        lines: usize,
        statements: usize,
    },
    Text {
        encoding: String,
        lines: usize,
        characters: usize,
    },
    Spreadsheet(SpreadsheetFinding),
    Generic {
        readable: bool,
        empty: bool,
    },
}
