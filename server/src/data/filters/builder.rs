//! SQL predicate builder
//!
//! Identifiers come only from the live schema; user text only ever reaches
//! the database as a bound parameter.

use crate::data::sql::SqlDialect;
use crate::data::types::{ColumnSchema, ColumnType, TableSchema};
use crate::utils::sql::contains_pattern;

use super::parser::parse_numeric_terms;
use super::types::{FilterSpec, NumericLiteral, SqlParams, SqlValue};

/// WHERE clause compiled from a filter spec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    /// `WHERE p1 AND p2 ...`, or `None` when no column produced a predicate
    pub clause: Option<String>,
    pub predicate_count: usize,
}

/// Compile the filter text of one column into a parenthesized predicate
///
/// Returns `None` when the text yields nothing to filter on: no valid
/// numeric terms, empty text, or a column type without filter support.
pub fn compile_predicate(
    dialect: &dyn SqlDialect,
    column: &ColumnSchema,
    raw: &str,
    params: &mut SqlParams,
) -> Option<String> {
    match column.data_type {
        ColumnType::Integer | ColumnType::Real => {
            numeric_predicate(dialect, column, raw, params)
        }
        ColumnType::Text => text_predicate(dialect, column, raw, params),
        ColumnType::Date => {
            tracing::debug!(column = %column.name, "Date filters are not supported");
            None
        }
        ColumnType::Other => {
            tracing::debug!(
                column = %column.name,
                declared_type = %column.declared_type,
                "No filter support for column type"
            );
            None
        }
    }
}

fn numeric_predicate(
    dialect: &dyn SqlDialect,
    column: &ColumnSchema,
    raw: &str,
    params: &mut SqlParams,
) -> Option<String> {
    let terms = parse_numeric_terms(raw);
    if terms.is_empty() {
        tracing::debug!(column = %column.name, raw, "No valid numeric filter terms");
        return None;
    }

    let col = dialect.quote_identifier(&column.name);
    let parts: Vec<String> = terms
        .iter()
        .map(|term| {
            let value = match (column.data_type, term.value) {
                (ColumnType::Integer, NumericLiteral::Int(v)) => SqlValue::Int(v),
                (_, literal) => SqlValue::Float(literal.as_f64()),
            };
            let idx = params.push(value);
            format!("{} {} {}", col, term.op.as_sql(), dialect.placeholder(idx))
        })
        .collect();

    Some(format!("({})", parts.join(" OR ")))
}

fn text_predicate(
    dialect: &dyn SqlDialect,
    column: &ColumnSchema,
    raw: &str,
    params: &mut SqlParams,
) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let col = dialect.quote_identifier(&column.name);
    let idx = params.push(SqlValue::Text(contains_pattern(raw)));
    Some(format!(
        "({})",
        dialect.contains_ignore_case(&col, &dialect.placeholder(idx))
    ))
}

/// Compose the predicates of every filtered column into one WHERE clause
///
/// Columns are visited in schema order, so the output is deterministic
/// regardless of query-string order. Names missing from the schema are
/// ignored.
pub fn build_where_clause(
    dialect: &dyn SqlDialect,
    schema: &TableSchema,
    spec: &FilterSpec,
    params: &mut SqlParams,
) -> CompiledFilter {
    for name in spec.column_names() {
        if schema.column(name).is_none() {
            tracing::debug!(table = %schema.table, column = name, "Ignoring filter on unknown column");
        }
    }

    let predicates: Vec<String> = schema
        .columns
        .iter()
        .filter_map(|column| {
            let raw = spec.get(&column.name)?;
            compile_predicate(dialect, column, raw, params)
        })
        .collect();

    if predicates.is_empty() {
        return CompiledFilter::default();
    }

    CompiledFilter {
        clause: Some(format!("WHERE {}", predicates.join(" AND "))),
        predicate_count: predicates.len(),
    }
}
