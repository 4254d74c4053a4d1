use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::table::ProductionTable;
use crate::domain::errors::LoadError;
use crate::infra::cache::TableCache;
use crate::usecase::ports::table_io::TableSource;

pub struct LoadService {
    source: Arc<dyn TableSource>,
    cache: TableCache,
}

impl LoadService {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self {
            source,
            cache: TableCache::new(),
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<ProductionTable>, LoadError> {
        let source = self.source.clone();
        let result = self.cache.get_or_load(path, |path| {
            let data = source.read(path)?;
            let table = ProductionTable::from_tabular(data)?;
            tracing::info!(
                path = %path.display(),
                rows = table.len(),
                columns = table.columns().len(),
                "loaded production table"
            );
            Ok(table)
        });
        if let Err(err) = &result {
            tracing::error!(path = %path.display(), "failed to load table: {err}");
        }
        result
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }
}
