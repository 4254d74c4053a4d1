use std::path::Path;

use crate::domain::entities::table::ProductionTable;
use crate::domain::errors::ExportError;

pub fn table_to_csv(table: &ProductionTable, target: &Path) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns().iter().map(|column| column.name.as_str()))?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.into_inner().map_err(|err| ExportError::Io {
        path: target.to_path_buf(),
        source: err.into_error(),
    })
}
