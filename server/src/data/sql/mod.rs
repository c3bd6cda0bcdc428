//! SQL abstraction layer for multi-database support
//!
//! Generates the small amount of backend-specific SQL the filter compiler
//! and executor need (placeholders, identifier quoting, case-insensitive
//! substring match) for PostgreSQL and SQLite.

mod dialect;
mod postgres_dialect;
mod sqlite_dialect;

pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

use serde::Serialize;

/// Database backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::Postgres => &PostgresDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_dialect_matches_name() {
        assert_eq!(Backend::Sqlite.dialect().name(), "sqlite");
        assert_eq!(Backend::Postgres.dialect().name(), "postgres");
        assert_eq!(Backend::Postgres.to_string(), "postgres");
    }
}
