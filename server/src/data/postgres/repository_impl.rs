//! CatalogRepository trait implementation for PostgreSQL

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::sql::Backend;
use crate::data::traits::{CatalogRepository, SelectQuery};
use crate::data::types::{QueryResult, TableSchema};

use super::PostgresService;
use super::repositories::catalog;

const BACKEND: &str = "postgres";

#[async_trait]
impl CatalogRepository for Arc<PostgresService> {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    async fn list_tables(&self) -> Result<Vec<String>, DataError> {
        catalog::list_tables(self.pool())
            .await
            .map_err(|e| DataError::catalog(BACKEND, e.upstream_message()))
    }

    async fn describe_table(&self, table: &str) -> Result<TableSchema, DataError> {
        catalog::describe_table(self.pool(), table)
            .await
            .map_err(|e| DataError::catalog(BACKEND, e.upstream_message()))
    }

    async fn run_select(&self, query: &SelectQuery) -> Result<QueryResult, DataError> {
        catalog::run_select(self.pool(), query)
            .await
            .map_err(|e| DataError::query(BACKEND, e.upstream_message()))
    }
}
