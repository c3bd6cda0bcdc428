//! Catalog introspection and bounded reads for PostgreSQL

use sqlx::postgres::PgTypeInfo;
use sqlx::{Column, Executor, PgPool, Statement};

use crate::data::filters::SqlValue;
use crate::data::postgres::PostgresError;
use crate::data::postgres::decode::decode_row;
use crate::data::traits::SelectQuery;
use crate::data::types::{
    ColumnSchema, ColumnType, FieldDescriptor, FieldType, QueryResult, TableSchema,
};

const LIST_TABLES_SQL: &str = "SELECT table_name::text \
     FROM information_schema.tables \
     WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
     ORDER BY table_name";

const DESCRIBE_TABLE_SQL: &str = "SELECT c.column_name::text, c.data_type::text \
     FROM information_schema.columns AS c \
     JOIN information_schema.tables AS t \
       ON t.table_schema = c.table_schema AND t.table_name = c.table_name \
     WHERE t.table_schema = 'public' AND t.table_type = 'BASE TABLE' \
       AND c.table_name = $1 \
     ORDER BY c.ordinal_position";

/// List base tables of the `public` schema
pub async fn list_tables(pool: &PgPool) -> Result<Vec<String>, PostgresError> {
    let names: Vec<String> = sqlx::query_scalar(LIST_TABLES_SQL).fetch_all(pool).await?;
    Ok(names)
}

/// Describe a table's columns; empty when the table does not exist
pub async fn describe_table(pool: &PgPool, table: &str) -> Result<TableSchema, PostgresError> {
    let rows: Vec<(String, String)> = sqlx::query_as(DESCRIBE_TABLE_SQL)
        .bind(table)
        .fetch_all(pool)
        .await?;

    let columns = rows
        .into_iter()
        .map(|(name, data_type)| {
            ColumnSchema::new(name, ColumnType::from_postgres(&data_type), data_type)
        })
        .collect();

    Ok(TableSchema::new(table, columns))
}

fn param_type(value: &SqlValue) -> PgTypeInfo {
    match value {
        SqlValue::Int(_) => PgTypeInfo::with_name("INT8"),
        SqlValue::Float(_) => PgTypeInfo::with_name("FLOAT8"),
        SqlValue::Text(_) => PgTypeInfo::with_name("TEXT"),
    }
}

/// Prepare and run a rendered SELECT on one pooled connection
///
/// Field descriptors come from the prepared statement, so they are present
/// even when no row matches.
pub async fn run_select(pool: &PgPool, query: &SelectQuery) -> Result<QueryResult, PostgresError> {
    let param_types: Vec<PgTypeInfo> = query.params.values.iter().map(param_type).collect();

    let mut conn = pool.acquire().await?;
    let statement = (&mut *conn)
        .prepare_with(&query.sql, &param_types)
        .await?;

    let fields = statement
        .columns()
        .iter()
        .map(|column| FieldDescriptor {
            name: column.name().to_string(),
            type_tag: FieldType::Oid(column.type_info().oid().map(|oid| oid.0).unwrap_or(0)),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_types() {
        assert_eq!(param_type(&SqlValue::Int(1)), PgTypeInfo::with_name("INT8"));
        assert_eq!(param_type(&SqlValue::Float(1.0)), PgTypeInfo::with_name("FLOAT8"));
        assert_eq!(
            param_type(&SqlValue::Text("x".into())),
            PgTypeInfo::with_name("TEXT")
        );
    }

    #[test]
    fn test_catalog_queries_bind_table_name() {
        assert!(DESCRIBE_TABLE_SQL.contains("c.table_name = $1"));
        assert!(LIST_TABLES_SQL.contains("table_schema = 'public'"));
        assert!(LIST_TABLES_SQL.ends_with("ORDER BY table_name"));
    }

    #[test]
    fn test_describe_covers_only_listed_tables() {
        // views and foreign tables also appear in information_schema.columns
        for predicate in ["t.table_schema = 'public'", "t.table_type = 'BASE TABLE'"] {
            assert!(DESCRIBE_TABLE_SQL.contains(predicate), "missing {predicate}");
        }
        assert!(LIST_TABLES_SQL.contains("table_type = 'BASE TABLE'"));
        assert!(DESCRIBE_TABLE_SQL.contains("JOIN information_schema.tables"));
    }
}
