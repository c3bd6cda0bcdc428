use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One result row, keyed by column name in result column order
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Engine type tag of a result column
///
/// PostgreSQL reports a type OID, SQLite a declared type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Oid(u32),
    Name(String),
}

/// Result column descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: FieldType,
}

/// Rows and field descriptors of one table read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub fields: Vec<FieldDescriptor>,
}

/// Column filters and row limit for one table read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    pub filters: BTreeMap<String, String>,
    pub limit: Option<u32>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.filters.insert(column.into(), text.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs; empty filter values are not sent
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(column, text)| (column.clone(), text.clone()))
            .collect();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// True when no filter value would be sent
    pub fn is_unfiltered(&self) -> bool {
        self.filters.values().all(|text| text.is_empty())
    }
}

/// Lifecycle of a filter controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerState {
    #[default]
    Idle,
    /// An edit is waiting for the quiet window to pass
    PendingDebounce,
    /// A fetch for the latest committed filters is in flight
    Fetching,
}

/// What a UI renders: current filters, latest applied data, last notice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub state: ControllerState,
    pub filters: BTreeMap<String, String>,
    pub result: Option<QueryResult>,
    /// Non-fatal error text from the last failed fetch
    pub notice: Option<String>,
}

impl Snapshot {
    pub fn rows(&self) -> &[Row] {
        self.result.as_ref().map(|r| r.rows.as_slice()).unwrap_or(&[])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        self.result
            .as_ref()
            .map(|r| r.fields.as_slice())
            .unwrap_or(&[])
    }
}
