use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::table::ProductionTable;
use crate::domain::errors::ExportError;
use crate::usecase::ports::table_io::TableSink;

pub struct ExportService {
    sink: Arc<dyn TableSink>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn TableSink>) -> Self {
        Self { sink }
    }

    pub fn export(&self, table: &ProductionTable, path: &Path) -> Result<(), ExportError> {
        match self.sink.write(table, path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), rows = table.len(), "exported table");
                Ok(())
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "export failed: {err}");
                Err(err)
            }
        }
    }
}
