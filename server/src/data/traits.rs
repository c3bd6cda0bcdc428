//! Repository traits for database backends
//!
//! Each catalog backend (SQLite, PostgreSQL) implements [`CatalogRepository`]
//! with its own introspection queries and row decoding.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::SqlParams;
use crate::data::sql::Backend;
use crate::data::types::{QueryResult, TableSchema};

/// Fully rendered SELECT with its bound parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub sql: String,
    pub params: SqlParams,
}

/// Catalog introspection and bounded row reads
///
/// Implementations are stateless over a shared pool: every call acquires a
/// pooled connection and releases it before returning.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Backend this repository talks to
    fn backend(&self) -> Backend;

    /// Names of the user tables in the default schema, ordered by name
    async fn list_tables(&self) -> Result<Vec<String>, DataError>;

    /// Columns of a table in ordinal order; empty when the table is unknown
    ///
    /// The table name is bound as a parameter of the catalog query.
    async fn describe_table(&self, table: &str) -> Result<TableSchema, DataError>;

    /// Execute a rendered SELECT and normalize the rows
    async fn run_select(&self, query: &SelectQuery) -> Result<QueryResult, DataError>;
}
