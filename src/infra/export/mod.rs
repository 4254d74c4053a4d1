pub mod csv;
pub mod xlsx;

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::table::ProductionTable;
use crate::domain::errors::ExportError;
use crate::infra::import::extension_of;
use crate::usecase::ports::table_io::TableSink;

pub const DEFAULT_EXPORT_NAME: &str = "dados_filtrados.xlsx";

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Writes `bytes` next to `path` and renames it into place, so readers
/// never observe a half-written file.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let partial = partial_path(path);
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Err(err) = fs::write(&partial, bytes).and_then(|_| fs::rename(&partial, path)) {
        let _ = fs::remove_file(&partial);
        return Err(io_error(err));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileTableSink;

impl TableSink for FileTableSink {
    fn write(&self, table: &ProductionTable, path: &Path) -> Result<(), ExportError> {
        let bytes = match extension_of(path).as_str() {
            "xlsx" => self::xlsx::table_to_xlsx(table)?,
            "csv" => self::csv::table_to_csv(table, path)?,
            _ => return Err(ExportError::UnsupportedFormat(path.to_path_buf())),
        };
        write_atomically(path, &bytes)
    }
}
