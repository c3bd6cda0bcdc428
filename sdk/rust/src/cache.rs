use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::QueryResult;

#[derive(Default)]
struct CacheInner {
    tables: Option<Vec<String>>,
    results: HashMap<String, QueryResult>,
}

/// Per-session cache of the table listing and the last result per table
///
/// Keyed by table name only. Entries are overwritten by committed filter
/// changes and never evicted automatically. Clones share the same entries.
#[derive(Clone, Default)]
pub struct TableCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> Option<Vec<String>> {
        self.inner.read().tables.clone()
    }

    pub fn set_tables(&self, tables: Vec<String>) {
        self.inner.write().tables = Some(tables);
    }

    pub fn get(&self, table: &str) -> Option<QueryResult> {
        self.inner.read().results.get(table).cloned()
    }

    pub fn contains(&self, table: &str) -> bool {
        self.inner.read().results.contains_key(table)
    }

    pub fn insert(&self, table: impl Into<String>, result: QueryResult) {
        self.inner.write().results.insert(table.into(), result);
    }

    /// Drop the cached listing and every cached result
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.tables = None;
        inner.results.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().results.is_empty()
    }
}
