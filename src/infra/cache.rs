use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::table::ProductionTable;
use crate::domain::errors::LoadError;

/// Loaded tables keyed by source path. Entries live until the process
/// exits; failed loads are not stored.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<PathBuf, Arc<ProductionTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Arc<ProductionTable>> {
        self.tables.get(path).cloned()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.tables.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get_or_load(
        &mut self,
        path: &Path,
        load: impl FnOnce(&Path) -> Result<ProductionTable, LoadError>,
    ) -> Result<Arc<ProductionTable>, LoadError> {
        if let Some(table) = self.get(path) {
            tracing::debug!(path = %path.display(), "table cache hit");
            return Ok(table);
        }
        let table = Arc::new(load(path)?);
        self.tables.insert(path.to_path_buf(), table.clone());
        Ok(table)
    }
}
