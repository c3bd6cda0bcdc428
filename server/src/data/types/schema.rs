//! Table schema types produced by catalog introspection

use serde::Serialize;

/// Column type category that decides how a filter is compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Date,
    Other,
}

impl ColumnType {
    /// Map an `information_schema.columns.data_type` value
    pub fn from_postgres(data_type: &str) -> Self {
        match data_type.trim().to_ascii_lowercase().as_str() {
            "integer" | "smallint" | "bigint" => Self::Integer,
            "real" | "double precision" | "numeric" => Self::Real,
            "character" | "character varying" | "text" => Self::Text,
            "date" => Self::Date,
            _ => Self::Other,
        }
    }

    /// Map a SQLite declared column type using the affinity rules
    pub fn from_sqlite(declared: &str) -> Self {
        let upper = declared.trim().to_ascii_uppercase();
        if upper.contains("INT") {
            Self::Integer
        } else if ["CHAR", "CLOB", "TEXT"].iter().any(|t| upper.contains(t)) {
            Self::Text
        } else if ["REAL", "FLOA", "DOUB", "NUMERIC", "DECIMAL"]
            .iter()
            .any(|t| upper.contains(t))
        {
            Self::Real
        } else if upper == "DATE" {
            Self::Date
        } else {
            Self::Other
        }
    }

    /// Whether filters on this column use the numeric comparison grammar
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Date => "date",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a live table, in ordinal position order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: ColumnType,
    /// Raw type text reported by the catalog (e.g. `character varying`)
    pub declared_type: String,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: ColumnType, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type,
            declared_type: declared_type.into(),
        }
    }
}

/// Ordered column list of one table, looked up fresh per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(table: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// A table with no columns is not a catalog entry
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }
}
