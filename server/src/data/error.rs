//! Unified error type for data layer
//!
//! Wraps errors from both catalog backends (PostgreSQL, SQLite) and separates
//! the two failure kinds the API distinguishes: schema lookup failures and
//! failures of the final data query.

use thiserror::Error;

/// Failure to resolve a table against the live catalog
#[derive(Error, Debug)]
pub enum SchemaLookupError {
    /// The table is not a catalog entry (or has no columns)
    #[error("Table not found: {0}")]
    UnknownTable(String),

    /// The catalog query itself failed
    #[error("Catalog lookup failed on {backend}: {message}")]
    Catalog {
        backend: &'static str,
        message: String,
    },
}

/// Failure executing the compiled SELECT
///
/// The upstream database message is kept verbatim. Never retried.
#[derive(Error, Debug)]
#[error("Query failed on {backend}: {message}")]
pub struct QueryError {
    pub backend: &'static str,
    pub message: String,
}

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    SchemaLookup(#[from] SchemaLookupError),

    #[error(transparent)]
    Query(#[from] QueryError),

    /// SQLite connection or pool error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL connection or pool error
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// Create a catalog lookup error from a backend error
    pub fn catalog(backend: &'static str, e: impl std::fmt::Display) -> Self {
        Self::SchemaLookup(SchemaLookupError::Catalog {
            backend,
            message: e.to_string(),
        })
    }

    /// Create a query error carrying the upstream message
    pub fn query(backend: &'static str, e: impl std::fmt::Display) -> Self {
        Self::Query(QueryError {
            backend,
            message: e.to_string(),
        })
    }

    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::SchemaLookup(SchemaLookupError::UnknownTable(table.into()))
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::SchemaLookup(SchemaLookupError::Catalog { backend, .. }) => backend,
            Self::Query(e) => e.backend,
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::SchemaLookup(SchemaLookupError::UnknownTable(_)) | Self::Config(_) => "unknown",
        }
    }
}

impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::Config(msg) => Self::Config(msg),
        }
    }
}

impl From<crate::data::postgres::PostgresError> for DataError {
    fn from(e: crate::data::postgres::PostgresError) -> Self {
        match e {
            crate::data::postgres::PostgresError::Database(e) => Self::Postgres(e),
            crate::data::postgres::PostgresError::Config(msg) => Self::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_table_display() {
        let err = DataError::unknown_table("ghosts");
        assert_eq!(err.to_string(), "Table not found: ghosts");
        assert!(matches!(
            err,
            DataError::SchemaLookup(SchemaLookupError::UnknownTable(ref t)) if t == "ghosts"
        ));
    }

    #[test]
    fn test_catalog_error_display() {
        let err = DataError::catalog("postgres", "connection refused");
        assert_eq!(
            err.to_string(),
            "Catalog lookup failed on postgres: connection refused"
        );
        assert_eq!(err.backend(), "postgres");
    }

    #[test]
    fn test_query_error_keeps_upstream_message() {
        let err = DataError::query("sqlite", "no such column: nope");
        match &err {
            DataError::Query(q) => assert_eq!(q.message, "no such column: nope"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.backend(), "sqlite");
    }

    #[test]
    fn test_from_postgres_config_error() {
        let err: DataError =
            crate::data::postgres::PostgresError::Config("missing host".into()).into();
        assert_eq!(err.to_string(), "Configuration error: missing host");
    }
}
