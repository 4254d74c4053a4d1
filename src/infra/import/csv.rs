use std::path::Path;

use crate::domain::entities::table::{parse_number, CellValue};
use crate::domain::errors::LoadError;
use crate::usecase::ports::table_io::TabularData;

pub fn text_to_value(text: &str) -> CellValue {
    if text.trim().is_empty() {
        return CellValue::Empty;
    }
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => CellValue::Number(value),
        _ => CellValue::Text(text.to_string()),
    }
}

/// Reads a comma- or semicolon-separated file with a header row.
pub fn read_csv(csv_path: &Path) -> Result<TabularData, LoadError> {
    if !csv_path.exists() {
        return Err(LoadError::NotFound(csv_path.to_path_buf()));
    }

    let delimiter = sniff_delimiter(csv_path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(csv_path)?;
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::EmptySheet);
    }

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(col_idx, name)| {
            super::xlsx::header_name(&CellValue::Text(name.to_string()), col_idx)
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<CellValue> = record.iter().map(text_to_value).collect();
        if row.iter().any(|cell| !cell.is_empty()) {
            rows.push(row);
        }
    }

    tracing::debug!(
        path = %csv_path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "read csv"
    );

    Ok(TabularData { columns, rows })
}

fn sniff_delimiter(csv_path: &Path) -> Result<u8, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;
    let mut first = csv::StringRecord::new();
    reader.read_record(&mut first)?;
    let header = first.iter().collect::<Vec<_>>().join(",");
    Ok(if first.len() <= 1 && header.contains(';') {
        b';'
    } else {
        b','
    })
}
