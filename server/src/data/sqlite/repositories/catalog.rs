//! Catalog introspection and bounded reads for SQLite

use sqlx::{Column, Executor, SqlitePool, Statement, TypeInfo};

use crate::data::filters::SqlValue;
use crate::data::sqlite::SqliteError;
use crate::data::sqlite::decode::decode_row;
use crate::data::traits::SelectQuery;
use crate::data::types::{
    ColumnSchema, ColumnType, FieldDescriptor, FieldType, QueryResult, TableSchema,
};

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     ORDER BY name";

const DESCRIBE_TABLE_SQL: &str = "SELECT p.name, p.type \
     FROM sqlite_master AS m JOIN pragma_table_info(m.name) AS p \
     WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
       AND m.name = ? \
     ORDER BY p.cid";

/// List user tables, skipping SQLite's internal tables
pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<String>, SqliteError> {
    let names: Vec<String> = sqlx::query_scalar(LIST_TABLES_SQL).fetch_all(pool).await?;
    Ok(names)
}

/// Describe a table's columns; empty when the table does not exist
pub async fn describe_table(pool: &SqlitePool, table: &str) -> Result<TableSchema, SqliteError> {
    let rows: Vec<(String, String)> = sqlx::query_as(DESCRIBE_TABLE_SQL)
        .bind(table)
        .fetch_all(pool)
        .await?;

    let columns = rows
        .into_iter()
        .map(|(name, declared)| {
            ColumnSchema::new(name, ColumnType::from_sqlite(&declared), declared)
        })
        .collect();

    Ok(TableSchema::new(table, columns))
}

/// Prepare and run a rendered SELECT on one pooled connection
pub async fn run_select(
    pool: &SqlitePool,
    query: &SelectQuery,
) -> Result<QueryResult, SqliteError> {
    let mut conn = pool.acquire().await?;
    let statement = (&mut *conn).prepare(&query.sql).await?;

    let fields = statement
        .columns()
        .iter()
        .map(|column| FieldDescriptor {
            name: column.name().to_string(),
            type_tag: FieldType::Name(column.type_info().name().to_string()),
        })
        .collect();

    let mut bound = statement.query();
    for value in &query.params.values {
        bound = match value {
            SqlValue::Int(v) => bound.bind(*v),
            SqlValue::Float(v) => bound.bind(*v),
            SqlValue::Text(v) => bound.bind(v.clone()),
        };
    }
    let rows = bound.fetch_all(&mut *conn).await?;

    Ok(QueryResult {
        rows: rows.iter().map(decode_row).collect(),
        fields,
    })
}
