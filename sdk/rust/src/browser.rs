use std::sync::Arc;

use crate::cache::TableCache;
use crate::controller::{ControllerConfig, FilterController};
use crate::error::ClientError;
use crate::source::TableSource;
use crate::types::{QueryResult, TableQuery};

/// One browsing session: cached table listing plus per-table controllers
pub struct TableBrowser {
    source: Arc<dyn TableSource>,
    cache: TableCache,
    config: ControllerConfig,
}

impl TableBrowser {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self::with_config(source, ControllerConfig::default())
    }

    pub fn with_config(source: Arc<dyn TableSource>, config: ControllerConfig) -> Self {
        Self {
            source,
            cache: TableCache::new(),
            config,
        }
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Table names, fetched once per session
    pub async fn tables(&self) -> Result<Vec<String>, ClientError> {
        if let Some(tables) = self.cache.tables() {
            return Ok(tables);
        }
        self.refresh_tables().await
    }

    /// Re-fetch the table listing, replacing the cached one
    pub async fn refresh_tables(&self) -> Result<Vec<String>, ClientError> {
        let tables = self.source.list_tables().await?;
        tracing::debug!(count = tables.len(), "Table listing fetched");
        self.cache.set_tables(tables.clone());
        Ok(tables)
    }

    /// Unfiltered rows of `table`, served from the cache when present
    pub async fn load_table(&self, table: &str) -> Result<QueryResult, ClientError> {
        if let Some(result) = self.cache.get(table) {
            tracing::debug!(table, "Table served from cache");
            return Ok(result);
        }
        let query = TableQuery {
            limit: self.config.limit,
            ..TableQuery::default()
        };
        let result = self.source.fetch_table(table, &query).await?;
        self.cache.insert(table, result.clone());
        Ok(result)
    }

    /// Load `table` and return a filter controller sharing this session's cache
    pub async fn controller(&self, table: &str) -> Result<FilterController, ClientError> {
        self.load_table(table).await?;
        Ok(FilterController::new(
            table,
            Arc::clone(&self.source),
            self.cache.clone(),
            self.config.clone(),
        ))
    }
}
