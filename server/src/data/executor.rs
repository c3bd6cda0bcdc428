//! Query executor
//!
//! Resolves the target table against the live catalog, compiles the filters
//! and runs one bounded `SELECT *` with every value bound.

use std::time::Instant;

use crate::core::constants::{DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT, MIN_QUERY_LIMIT};
use crate::data::error::DataError;
use crate::data::filters::{FilterSpec, SqlParams, SqlValue, build_where_clause};
use crate::data::sql::SqlDialect;
use crate::data::traits::{CatalogRepository, SelectQuery};
use crate::data::types::{QueryResult, TableSchema};

/// Row limit of a table query, always within `[MIN_QUERY_LIMIT, MAX_QUERY_LIMIT]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimit(u32);

impl QueryLimit {
    /// Interpret the raw `limit` query parameter
    ///
    /// Absent or non-numeric values use the default; numeric values are
    /// clamped. An all-digit value too large for `i64` clamps like any other.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::default();
        };

        let value = match raw.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                let (negative, digits) = match raw.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, raw.strip_prefix('+').unwrap_or(raw)),
                };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Self::default();
                }
                if negative { i64::MIN } else { i64::MAX }
            }
        };

        Self(value.clamp(MIN_QUERY_LIMIT as i64, MAX_QUERY_LIMIT as i64) as u32)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for QueryLimit {
    fn default() -> Self {
        Self(DEFAULT_QUERY_LIMIT)
    }
}

/// Render the bounded SELECT for a resolved table
///
/// The table name is interpolated only as a quoted identifier taken from the
/// schema; filter values and the limit are bound.
pub fn build_select(
    dialect: &dyn SqlDialect,
    schema: &TableSchema,
    spec: &FilterSpec,
    limit: QueryLimit,
) -> SelectQuery {
    let mut params = SqlParams::default();
    let compiled = build_where_clause(dialect, schema, spec, &mut params);

    let mut sql = format!("SELECT * FROM {}", dialect.quote_identifier(&schema.table));
    if let Some(clause) = &compiled.clause {
        sql.push(' ');
        sql.push_str(clause);
    }
    let idx = params.push(SqlValue::Int(i64::from(limit.get())));
    sql.push(' ');
    sql.push_str(&dialect.limit(&dialect.placeholder(idx)));

    tracing::debug!(
        table = %schema.table,
        predicates = compiled.predicate_count,
        params = params.len(),
        %sql,
        "Compiled table query"
    );

    SelectQuery { sql, params }
}

/// Look up the table schema, then run the filtered, bounded query
///
/// No data query is issued for a table the catalog does not know.
pub async fn execute_table_query(
    repo: &dyn CatalogRepository,
    table: &str,
    spec: &FilterSpec,
    limit: QueryLimit,
) -> Result<QueryResult, DataError> {
    let start = Instant::now();

    let schema = repo.describe_table(table).await?;
    if schema.is_empty() {
        tracing::debug!(table, "Table not found in catalog");
        return Err(DataError::unknown_table(table));
    }

    let query = build_select(repo.backend().dialect(), &schema, spec, limit);
    let result = repo.run_select(&query).await?;

    tracing::info!(
        table,
        backend = %repo.backend(),
        filters = spec.len(),
        limit = limit.get(),
        rows = result.rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Table query completed"
    );

    Ok(result)
}
