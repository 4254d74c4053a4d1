use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::table::{CellValue, Column, ColumnKind, ProductionTable};

const DATE_NAME_HINTS: [&str; 2] = ["data", "date"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Index of the first column that is typed as date/time or whose name
/// mentions a date.
pub fn detect_date_column(columns: &[Column]) -> Option<usize> {
    columns.iter().position(|column| {
        let name = column.name.to_lowercase();
        column.kind == ColumnKind::DateTime
            || DATE_NAME_HINTS.iter().any(|hint| name.contains(hint))
    })
}

pub fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // fractional seconds as written by some exporters
    let trimmed = trimmed.split('.').next().unwrap_or(trimmed);
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(trimmed, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        })
}

pub fn parse_date_cell(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::DateTime(value) => Some(*value),
        CellValue::Text(text) => parse_date_text(text),
        _ => None,
    }
}

/// Outcome of locating and converting the production-date column.
#[derive(Debug, Clone, PartialEq)]
pub struct DateResolution {
    pub table: ProductionTable,
    pub column: Option<String>,
    pub dropped_rows: usize,
}

pub fn resolve_dates(table: &ProductionTable) -> DateResolution {
    let Some(date_idx) = detect_date_column(table.columns()) else {
        tracing::warn!("no date column detected among {} columns", table.columns().len());
        return DateResolution {
            table: table.clone(),
            column: None,
            dropped_rows: 0,
        };
    };

    let column = table.columns()[date_idx].name.clone();
    let (resolved, dropped_rows) = table.with_date_column(date_idx, parse_date_cell);
    if dropped_rows > 0 {
        tracing::warn!(column = %column, dropped_rows, "dropped rows without a valid date");
    }
    tracing::debug!(column = %column, rows = resolved.len(), "resolved date column");

    DateResolution {
        table: resolved,
        column: Some(column),
        dropped_rows,
    }
}
