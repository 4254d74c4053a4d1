use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::date_column::parse_date_text;
use crate::domain::entities::table::CellValue;
use crate::domain::errors::LoadError;
use crate::usecase::ports::table_io::TabularData;

pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::Text(v.to_string()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => v
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Number(v.as_f64())),
        Data::DateTimeIso(v) => parse_date_text(v)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(v.to_string())),
        Data::DurationIso(v) => CellValue::Text(v.to_string()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

pub(crate) fn header_name(cell: &CellValue, col_idx: usize) -> String {
    let name = cell.to_string();
    if name.trim().is_empty() {
        format!("Unnamed: {col_idx}")
    } else {
        name.trim().to_string()
    }
}

/// Reads the first worksheet; its first row holds the column names.
pub fn read_first_sheet(xlsx_path: &Path) -> Result<TabularData, LoadError> {
    if !xlsx_path.exists() {
        return Err(LoadError::NotFound(xlsx_path.to_path_buf()));
    }
    let workbook_error = |message: String| LoadError::Workbook {
        path: xlsx_path.to_path_buf(),
        message,
    };

    let mut workbook =
        open_workbook_auto(xlsx_path).map_err(|err| workbook_error(err.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::EmptySheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| workbook_error(format!("{sheet_name}: {err}")))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(LoadError::EmptySheet);
    };
    let columns: Vec<String> = header_row
        .iter()
        .map(cell_to_value)
        .enumerate()
        .map(|(col_idx, cell)| header_name(&cell, col_idx))
        .collect();

    let rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_to_value).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    tracing::debug!(
        path = %xlsx_path.display(),
        sheet = %sheet_name,
        columns = columns.len(),
        rows = rows.len(),
        "read workbook sheet"
    );

    Ok(TabularData { columns, rows })
}
