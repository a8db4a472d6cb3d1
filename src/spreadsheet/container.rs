use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::format::{LEGACY_CFB_SIGNATURE, ZIP_SIGNATURE};

use super::ContainerKind;

#[cfg(feature = "advanced-spreadsheet")]
use super::{missing_percentage, CellKind, EngineFault, FaultClass, SheetFinding};

/// Classifies the container from the first eight bytes on disk.
pub(super) fn read_signature(path: &Path) -> io::Result<ContainerKind> {
    let mut header = [0u8; 8];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < header.len() {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    let head = &header[..filled];
    if head.starts_with(&ZIP_SIGNATURE) {
        Ok(ContainerKind::Zip)
    } else if head.starts_with(&LEGACY_CFB_SIGNATURE) {
        Ok(ContainerKind::LegacyCfb)
    } else {
        Ok(ContainerKind::Other)
    }
}

/// Fault surfaced by the reduced-capability check, split by whether the
/// container itself or only the workbook part was at fault.
pub(super) enum BasicFault {
    Container(String),
    Workbook(String),
}

/// Opens the zip container and lists the sheet names declared in the
/// workbook part. No cell data is touched.
pub(super) fn enumerate_sheet_names(path: &Path) -> Result<Vec<String>, BasicFault> {
    let file = File::open(path).map_err(|e| BasicFault::Container(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| BasicFault::Container(e.to_string()))?;
    let part = archive
        .by_name("xl/workbook.xml")
        .map_err(|e| BasicFault::Workbook(e.to_string()))?;
    parse_workbook_sheets(BufReader::new(part)).map_err(BasicFault::Workbook)
}

/// Pulls the `name` attribute off every `<sheet>` element.
fn parse_workbook_sheets(reader: impl BufRead) -> Result<Vec<String>, String> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut names = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                if e.name().local_name().as_ref() == b"sheet" {
                    if let Ok(Some(attr)) = e.try_get_attribute("name") {
                        names.push(String::from_utf8_lossy(&attr.value).into_owned());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("workbook XML malformed: {e}")),
        }
        buf.clear();
    }

    Ok(names)
}

/// Walks every worksheet part directly, reading cell values and type
/// attributes while never touching styles or themes. This is the engine
/// of last resort when style parts are the thing that is broken.
#[cfg(feature = "advanced-spreadsheet")]
pub(super) fn values_only_walk(
    path: &Path,
) -> Result<(Vec<String>, Vec<SheetFinding>), EngineFault> {
    let container = |message: String| EngineFault {
        class: FaultClass::Container,
        message,
    };
    let other = |message: String| EngineFault {
        class: FaultClass::Other,
        message,
    };

    let file = File::open(path).map_err(|e| container(e.to_string()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| container(format!("not a valid zip container: {e}")))?;

    let names = {
        let part = archive
            .by_name("xl/workbook.xml")
            .map_err(|e| other(format!("workbook part missing: {e}")))?;
        parse_workbook_sheets(BufReader::new(part)).map_err(other)?
    };

    // Worksheet part numbering follows creation order in practice, which
    // pairs with the workbook's declared sheet order.
    let mut parts: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("xl/worksheets/sheet") && n.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    parts.sort_by_key(|n| (n.len(), n.clone()));

    let mut sheets = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let name = names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("sheet{}", i + 1));
        let entry = archive
            .by_name(part)
            .map_err(|e| other(format!("worksheet part '{part}' unreadable: {e}")))?;
        let sheet = walk_sheet_part(&name, BufReader::new(entry))
            .map_err(|e| other(format!("worksheet part '{part}': {e}")))?;
        sheets.push(sheet);
    }

    Ok((names, sheets))
}

/// Column index from a cell reference like `BC12` (0-based).
#[cfg(feature = "advanced-spreadsheet")]
fn column_index(reference: &[u8]) -> Option<usize> {
    let mut index = 0usize;
    let mut seen = false;
    for &b in reference {
        if b.is_ascii_uppercase() {
            index = index * 26 + usize::from(b - b'A') + 1;
            seen = true;
        } else {
            break;
        }
    }
    seen.then(|| index - 1)
}

#[cfg(feature = "advanced-spreadsheet")]
fn cell_kind(type_attr: Option<&[u8]>) -> CellKind {
    match type_attr {
        Some(b"s" | b"str" | b"inlineStr") => CellKind::Text,
        Some(b"b") => CellKind::Bool,
        Some(b"d") => CellKind::DateTime,
        Some(b"e") => CellKind::Error,
        // Absent or "n" means a numeric cell.
        _ => CellKind::Number,
    }
}

#[cfg(feature = "advanced-spreadsheet")]
fn walk_sheet_part(name: &str, reader: impl BufRead) -> Result<SheetFinding, String> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut rows = 0usize;
    let mut columns = 0usize;
    let mut filled = 0usize;
    let mut kinds: Vec<CellKind> = Vec::new();

    let mut cursor = 0usize;
    let mut cell: Option<(usize, CellKind)> = None;
    let mut has_value = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().local_name().as_ref() == b"row" => {
                rows += 1;
                cursor = 0;
            }
            Ok(Event::Start(e) | Event::Empty(e)) if e.name().local_name().as_ref() == b"c" => {
                let column = e
                    .try_get_attribute("r")
                    .ok()
                    .flatten()
                    .and_then(|attr| column_index(&attr.value))
                    .unwrap_or(cursor);
                cursor = column + 1;
                columns = columns.max(cursor);

                let kind = e
                    .try_get_attribute("t")
                    .ok()
                    .flatten()
                    .map_or(CellKind::Number, |attr| cell_kind(Some(&attr.value)));
                cell = Some((column, kind));
                has_value = false;
            }
            Ok(Event::Start(e))
                if matches!(e.name().local_name().as_ref(), b"v" | b"is") && cell.is_some() =>
            {
                has_value = true;
            }
            Ok(Event::End(e)) if e.name().local_name().as_ref() == b"c" => {
                if let Some((column, kind)) = cell.take() {
                    if has_value {
                        filled += 1;
                        if kinds.len() <= column {
                            kinds.resize(column + 1, CellKind::Empty);
                        }
                        CellKind::merge(&mut kinds[column], kind);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("malformed XML at byte {}: {e}", xml.buffer_position())),
        }
        buf.clear();
    }

    if kinds.len() < columns {
        kinds.resize(columns, CellKind::Empty);
    }

    let cells = rows * columns;
    let missing = cells.saturating_sub(filled);
    Ok(SheetFinding {
        name: name.to_string(),
        rows,
        columns,
        cells,
        missing_cells: missing,
        missing_percentage: missing_percentage(missing, cells),
        column_types: kinds.iter().map(|k| k.label().to_string()).collect(),
    })
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
