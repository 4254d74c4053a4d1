pub mod csv;
pub mod xlsx;

use std::path::Path;

use crate::domain::errors::LoadError;
use crate::usecase::ports::table_io::{TableSource, TabularData};

pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Reads spreadsheets and csv files, picking the reader by extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTableSource;

impl TableSource for FileTableSource {
    fn read(&self, path: &Path) -> Result<TabularData, LoadError> {
        let ext = extension_of(path);
        if ext == "csv" {
            self::csv::read_csv(path)
        } else if self::xlsx::WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            self::xlsx::read_first_sheet(path)
        } else {
            Err(LoadError::UnsupportedFormat(path.to_path_buf()))
        }
    }
}
