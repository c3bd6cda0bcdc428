//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn contains_ignore_case(&self, quoted_col: &str, placeholder: &str) -> String {
        format!("{} LIKE {} ESCAPE '\\'", quoted_col, placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(5), "?");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert_eq!(
            SqliteDialect.contains_ignore_case("\"name\"", "?"),
            "\"name\" LIKE ? ESCAPE '\\'"
        );
    }

    #[test]
    fn test_quote_identifier_default() {
        assert_eq!(SqliteDialect.quote_identifier("id"), "\"id\"");
    }
}
