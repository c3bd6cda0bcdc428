use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{QueryResult, TableQuery};

/// Where table listings and rows come from
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Table names, ordered by name
    async fn list_tables(&self) -> Result<Vec<String>, ClientError>;

    /// Rows of `table` matching `query`
    async fn fetch_table(&self, table: &str, query: &TableQuery)
    -> Result<QueryResult, ClientError>;
}
