//! SQL dialect trait for multi-database support

use crate::utils::sql::quote_identifier;

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases differ in:
/// - Parameter placeholders (? vs $1)
/// - Case-insensitive matching (ILIKE vs LIKE)
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Quote an identifier that has already been checked against the catalog
    fn quote_identifier(&self, name: &str) -> String {
        quote_identifier(name)
    }

    /// Case-insensitive substring match of a quoted column against a
    /// placeholder bound to an escaped `%text%` pattern
    ///
    /// - PostgreSQL: `col ILIKE $n ESCAPE '\'`
    /// - SQLite: `col LIKE ? ESCAPE '\'` (LIKE is case-insensitive for ASCII)
    fn contains_ignore_case(&self, quoted_col: &str, placeholder: &str) -> String;

    /// Generate a LIMIT clause bound to a placeholder
    fn limit(&self, placeholder: &str) -> String {
        format!("LIMIT {}", placeholder)
    }
}
