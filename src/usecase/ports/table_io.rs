use std::path::Path;

use crate::domain::entities::table::{CellValue, ProductionTable};
use crate::domain::errors::{ExportError, LoadError};

/// A sheet as read from disk: header names and untyped rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

pub trait TableSource {
    fn read(&self, path: &Path) -> Result<TabularData, LoadError>;
}

pub trait TableSink {
    fn write(&self, table: &ProductionTable, path: &Path) -> Result<(), ExportError>;
}
