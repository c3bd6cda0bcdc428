//! CatalogRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::sql::Backend;
use crate::data::traits::{CatalogRepository, SelectQuery};
use crate::data::types::{QueryResult, TableSchema};

use super::SqliteService;
use super::repositories::catalog;

const BACKEND: &str = "sqlite";

#[async_trait]
impl CatalogRepository for Arc<SqliteService> {
    fn backend(&self) -> Backend {
        Backend::Sqlite
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

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::error::SchemaLookupError;
    use crate::data::executor::{QueryLimit, execute_table_query};
    use crate::data::filters::FilterSpec;
    use crate::data::sqlite::test_support::teams_pool;

    async fn repo() -> Arc<SqliteService> {
        Arc::new(SqliteService::from_pool(teams_pool().await))
    }

    fn spec(pairs: &[(&str, &str)]) -> FilterSpec {
        FilterSpec::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    fn ids(result: &QueryResult) -> Vec<i64> {
        result
            .rows
            .iter()
            .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
            .collect()
    }

    #[tokio::test]
    async fn test_numeric_disjunction() {
        let repo = repo().await;
        let result = execute_table_query(
            &repo,
            "teams",
            &spec(&[("id", ">10,<5")]),
            QueryLimit::default(),
        )
        .await
        .unwrap();
        let mut got = ids(&result);
        got.sort();
        assert_eq!(got, vec![3, 12, 15]);
    }

    #[tokio::test]
    async fn test_text_filter_case_insensitive() {
        let repo = repo().await;
        let result = execute_table_query(
            &repo,
            "teams",
            &spec(&[("name", "cow")]),
            QueryLimit::default(),
        )
        .await
        .unwrap();
        assert_eq!(ids(&result), vec![7]);
        assert_eq!(result.rows[0].get("name"), Some(&json!("Cowboys")));
    }

    #[tokio::test]
    async fn test_text_filter_folds_ascii_case_only() {
        let repo = repo().await;
        sqlx::query("INSERT INTO teams (id, name) VALUES (20, 'Élan')")
            .execute(repo.pool())
            .await
            .unwrap();

        for (needle, expected) in [("BEARS", vec![3]), ("lan", vec![20]), ("Élan", vec![20])] {
            let result = execute_table_query(
                &repo,
                "teams",
                &spec(&[("name", needle)]),
                QueryLimit::default(),
            )
            .await
            .unwrap();
            assert_eq!(ids(&result), expected, "needle {needle:?}");
        }

        // LIKE leaves non-ASCII letters unfolded
        let result = execute_table_query(
            &repo,
            "teams",
            &spec(&[("name", "élan")]),
            QueryLimit::default(),
        )
        .await
        .unwrap();
        assert!(result.rows.is_empty());
    }

    #[tokio::test]
    async fn test_like_metacharacters_match_literally() {
        let repo = repo().await;
        let result = execute_table_query(
            &repo,
            "teams",
            &spec(&[("name", "0% R")]),
            QueryLimit::default(),
        )
        .await
        .unwrap();
        assert_eq!(ids(&result), vec![15]);

        let result = execute_table_query(
            &repo,
            "teams",
            &spec(&[("name", "_")]),
            QueryLimit::default(),
        )
        .await
        .unwrap();
        assert_eq!(ids(&result), vec![15]);
    }

    #[tokio::test]
    async fn test_filters_and_across_columns() {
        let repo = repo().await;
        let result = execute_table_query(
            &repo,
            "teams",
            &spec(&[("id", "<13"), ("rating", ">=4"), ("bogus", "1")]),
            QueryLimit::default(),
        )
        .await
        .unwrap();
        let mut got = ids(&result);
        got.sort();
        assert_eq!(got, vec![7, 12]);
    }

    #[tokio::test]
    async fn test_limit_bounds_rows() {
        let repo = repo().await;
        let result = execute_table_query(
            &repo,
            "teams",
            &FilterSpec::default(),
            QueryLimit::parse(Some("0")),
        )
        .await
        .unwrap();
        assert_eq!(result.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_injection_attempts_are_data() {
        let repo = repo().await;
        for attack in [
            "' OR '1'='1",
            "x'); DROP TABLE teams; --",
            "%' UNION SELECT name FROM sqlite_master --",
        ] {
            let result = execute_table_query(
                &repo,
                "teams",
                &spec(&[("name", attack), ("id", attack)]),
                QueryLimit::default(),
            )
            .await
            .unwrap();
            assert!(result.rows.is_empty(), "attack {attack:?} matched rows");
        }
        let tables = repo.list_tables().await.unwrap();
        assert!(tables.contains(&"teams".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_table() {
        let repo = repo().await;
        let err = execute_table_query(
            &repo,
            "teams\"; DROP TABLE teams; --",
            &FilterSpec::default(),
            QueryLimit::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            DataError::SchemaLookup(SchemaLookupError::UnknownTable(_))
        ));
    }

    #[tokio::test]
    async fn test_catalog_failure_after_close() {
        let repo = repo().await;
        repo.close().await;
        let err = repo.list_tables().await.unwrap_err();
        assert!(matches!(
            err,
            DataError::SchemaLookup(SchemaLookupError::Catalog { backend: "sqlite", .. })
        ));
    }
}
