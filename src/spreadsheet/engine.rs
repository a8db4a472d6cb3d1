use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xls, Xlsx};

use super::{container, missing_percentage, Attempt, CellKind, EngineFault, FaultClass};
use super::{EngineKind, SheetFinding};

pub(super) struct EngineOutput {
    pub engine: EngineKind,
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetFinding>,
}

pub(super) fn run(attempt: Attempt, path: &Path) -> Result<EngineOutput, EngineFault> {
    match attempt {
        Attempt::Primary => run_primary(path),
        Attempt::StylesDisabled => run_style_free(path),
        Attempt::LegacyReader => run_legacy(path),
    }
}

/// A zip-level error means the container itself is bad; a complaint
/// about style or theme parts is recoverable without them.
fn classify_xlsx_fault(e: &calamine::XlsxError) -> FaultClass {
    if matches!(e, calamine::XlsxError::Zip(_)) {
        return FaultClass::Container;
    }
    let text = e.to_string().to_lowercase();
    if text.contains("styles") || text.contains("theme") {
        FaultClass::Styles
    } else {
        FaultClass::Other
    }
}

fn run_primary(path: &Path) -> Result<EngineOutput, EngineFault> {
    let fault = |e: &calamine::XlsxError| EngineFault {
        class: classify_xlsx_fault(e),
        message: e.to_string(),
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| fault(&e))?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = workbook.worksheet_range(name).map_err(|e| EngineFault {
            class: classify_xlsx_fault(&e),
            message: format!("sheet '{name}': {e}"),
        })?;
        sheets.push(sheet_from_range(name, &range));
    }

    Ok(EngineOutput {
        engine: EngineKind::Primary,
        sheet_names,
        sheets,
    })
}

fn run_style_free(path: &Path) -> Result<EngineOutput, EngineFault> {
    let (sheet_names, sheets) = container::values_only_walk(path)?;
    Ok(EngineOutput {
        engine: EngineKind::StyleFree,
        sheet_names,
        sheets,
    })
}

fn run_legacy(path: &Path) -> Result<EngineOutput, EngineFault> {
    let fault = |e: calamine::XlsError, context: Option<&str>| EngineFault {
        class: FaultClass::Other,
        message: match context {
            Some(name) => format!("sheet '{name}': {e}"),
            None => e.to_string(),
        },
    };

    let mut workbook: Xls<_> = open_workbook(path).map_err(|e| fault(e, None))?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| fault(e, Some(name)))?;
        sheets.push(sheet_from_range(name, &range));
    }

    Ok(EngineOutput {
        engine: EngineKind::Legacy,
        sheet_names,
        sheets,
    })
}

fn kind_of(cell: &Data) -> CellKind {
    match cell {
        Data::Empty => CellKind::Empty,
        Data::Int(_) | Data::Float(_) => CellKind::Number,
        Data::String(_) => CellKind::Text,
        Data::Bool(_) => CellKind::Bool,
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => CellKind::DateTime,
        Data::Error(_) => CellKind::Error,
    }
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> SheetFinding {
    let (rows, columns) = range.get_size();
    let cells = rows * columns;

    let mut missing = 0usize;
    let mut kinds = vec![CellKind::Empty; columns];
    for row in range.rows() {
        for (column, cell) in row.iter().enumerate() {
            let kind = kind_of(cell);
            if kind == CellKind::Empty {
                missing += 1;
                continue;
            }
            CellKind::merge(&mut kinds[column], kind);
        }
    }

    SheetFinding {
        name: name.to_string(),
        rows,
        columns,
        cells,
        missing_cells: missing,
        missing_percentage: missing_percentage(missing, cells),
        column_types: kinds.iter().map(|k| k.label().to_string()).collect(),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
