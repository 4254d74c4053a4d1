use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

use crate::domain::entities::selector::DateBounds;
use crate::domain::errors::LoadError;
use crate::usecase::ports::table_io::TabularData;

pub const ORDER_COLUMN: &str = "Pedido";
pub const QUANTITY_COLUMN: &str = "Quantidade Impressa";
pub const OPERATOR_COLUMN: &str = "Usuário";
pub const PRINTER_COLUMN: &str = "Impressora";
pub const LABEL_COLUMN: &str = "Etiqueta";

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => parse_number(text),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    /// Text used for grouping and identity: the rendered cell, exactly as
    /// stored. Numbers render without a zero fraction, so `Number(1.0)` and
    /// `Text("1")` share the key `"1"`.
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::Number(value) => write!(f, "{}", format_plain_number(*value)),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::DateTime(value) if value.time() == NaiveTime::MIN => {
                write!(f, "{}", value.format("%d/%m/%Y"))
            }
            CellValue::DateTime(value) => write!(f, "{}", value.format("%d/%m/%Y %H:%M")),
        }
    }
}

pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace('.', "").replace(',', ".").parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Renders a number without thousands separators, dropping a zero fraction.
pub fn format_plain_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Empty,
    Number,
    Text,
    Bool,
    DateTime,
    Mixed,
}

impl ColumnKind {
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut kind = ColumnKind::Empty;
        for cell in cells {
            let cell_kind = match cell {
                cell if cell.is_empty() => continue,
                CellValue::Empty => continue,
                CellValue::Text(_) => ColumnKind::Text,
                CellValue::Number(_) => ColumnKind::Number,
                CellValue::Bool(_) => ColumnKind::Bool,
                CellValue::DateTime(_) => ColumnKind::DateTime,
            };
            kind = match kind {
                ColumnKind::Empty => cell_kind,
                current if current == cell_kind => current,
                _ => return ColumnKind::Mixed,
            };
        }
        kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionSchema {
    pub order: usize,
    pub quantity: usize,
    pub operator: usize,
    pub printer: usize,
    pub label: usize,
    pub date: Option<usize>,
}

impl ProductionSchema {
    pub fn resolve(columns: &[Column]) -> Result<Self, LoadError> {
        let find = |name: &str| {
            column_position(columns, name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            order: find(ORDER_COLUMN)?,
            quantity: find(QUANTITY_COLUMN)?,
            operator: find(OPERATOR_COLUMN)?,
            printer: find(PRINTER_COLUMN)?,
            label: find(LABEL_COLUMN)?,
            date: None,
        })
    }
}

fn column_position(columns: &[Column], name: &str) -> Option<usize> {
    columns
        .iter()
        .position(|column| column.name.trim() == name.trim())
}

/// Rows of one account's production report. Derived tables share the
/// column schema of the table they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionTable {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
    schema: ProductionSchema,
}

impl ProductionTable {
    pub fn from_tabular(data: TabularData) -> Result<Self, LoadError> {
        let TabularData { columns, mut rows } = data;
        if columns.is_empty() {
            return Err(LoadError::EmptySheet);
        }

        let width = columns.len();
        for row in rows.iter_mut() {
            row.resize(width, CellValue::Empty);
        }

        let columns: Vec<Column> = columns
            .into_iter()
            .enumerate()
            .map(|(col_idx, name)| Column {
                kind: ColumnKind::infer(rows.iter().map(|row| &row[col_idx])),
                name: name.trim().to_string(),
            })
            .collect();
        let schema = ProductionSchema::resolve(&columns)?;

        for (row_idx, row) in rows.iter().enumerate() {
            let cell = &row[schema.quantity];
            if cell.is_empty() {
                continue;
            }
            // header occupies the first line of the sheet
            let line = row_idx + 2;
            match cell.as_number() {
                Some(value) if value < 0.0 => {
                    return Err(LoadError::NegativeQuantity { row: line, value });
                }
                Some(_) => {}
                None => {
                    return Err(LoadError::InvalidQuantity {
                        row: line,
                        value: cell.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            columns,
            rows,
            schema,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|column| column.name.clone()).collect()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn schema(&self) -> &ProductionSchema {
        &self.schema
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        column_position(&self.columns, name)
    }

    pub fn date_column(&self) -> Option<&Column> {
        self.schema.date.and_then(|idx| self.columns.get(idx))
    }

    pub fn records(&self) -> impl Iterator<Item = ProductionRecord<'_>> + '_ {
        self.rows.iter().map(|row| ProductionRecord {
            row,
            schema: &self.schema,
        })
    }

    /// New table holding the records that satisfy `keep`, in original order.
    pub fn retain(&self, keep: impl Fn(&ProductionRecord<'_>) -> bool) -> Self {
        let rows = self
            .records()
            .filter(|record| keep(record))
            .map(|record| record.row.to_vec())
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
            schema: self.schema,
        }
    }

    /// Replaces the cells of `date_idx` with parsed dates and drops rows
    /// without one. Returns the derived table and the number of dropped rows.
    pub fn with_date_column(
        &self,
        date_idx: usize,
        parse: impl Fn(&CellValue) -> Option<NaiveDateTime>,
    ) -> (Self, usize) {
        let mut dropped = 0;
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            match row.get(date_idx).and_then(&parse) {
                Some(date) => {
                    let mut row = row.clone();
                    row[date_idx] = CellValue::DateTime(date);
                    rows.push(row);
                }
                None => dropped += 1,
            }
        }

        let mut columns = self.columns.clone();
        if let Some(column) = columns.get_mut(date_idx) {
            column.kind = if rows.is_empty() {
                ColumnKind::Empty
            } else {
                ColumnKind::DateTime
            };
        }

        let table = Self {
            columns,
            rows,
            schema: ProductionSchema {
                date: Some(date_idx),
                ..self.schema
            },
        };
        (table, dropped)
    }

    pub fn date_bounds(&self) -> Option<DateBounds> {
        let mut dates = self
            .records()
            .filter_map(|record| record.production_date())
            .map(|date| date.date());
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });
        Some(DateBounds { min, max })
    }
}

/// Typed view over one row of a [`ProductionTable`].
#[derive(Debug, Clone, Copy)]
pub struct ProductionRecord<'a> {
    row: &'a [CellValue],
    schema: &'a ProductionSchema,
}

impl<'a> ProductionRecord<'a> {
    pub fn cell(&self, col_idx: usize) -> &'a CellValue {
        self.row.get(col_idx).unwrap_or(&CellValue::Empty)
    }

    pub fn order_id(&self) -> Option<String> {
        let cell = self.cell(self.schema.order);
        (!cell.is_empty()).then(|| cell.as_key())
    }

    pub fn printed_quantity(&self) -> f64 {
        self.cell(self.schema.quantity).as_number().unwrap_or(0.0)
    }

    pub fn production_date(&self) -> Option<NaiveDateTime> {
        self.schema
            .date
            .and_then(|idx| self.cell(idx).as_datetime())
    }
}
