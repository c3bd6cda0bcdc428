//! Filter type definitions

use std::collections::HashMap;

use crate::core::constants::LIMIT_PARAM;

/// Comparison operator of a numeric filter term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl ComparisonOp {
    /// Parse the operator prefix of a term; no prefix means equality
    pub fn from_prefix(prefix: Option<&str>) -> Option<Self> {
        match prefix {
            None | Some("") | Some("=") => Some(Self::Eq),
            Some("<") => Some(Self::Lt),
            Some(">") => Some(Self::Gt),
            Some("<=") => Some(Self::Lte),
            Some(">=") => Some(Self::Gte),
            Some(_) => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
        }
    }
}

/// Numeric literal of a filter term
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericLiteral {
    Int(i64),
    Float(f64),
}

impl NumericLiteral {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }
}

/// One `op value` term of a numeric filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericTerm {
    pub op: ComparisonOp,
    pub value: NumericLiteral,
}

/// A bound query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    /// Append a value and return its 1-based placeholder index
    pub fn push(&mut self, value: SqlValue) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Raw filter text per column name, as received from the query string
///
/// The reserved `limit` parameter is never a filter. When a name repeats,
/// the last value wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    entries: HashMap<String, String>,
}

impl FilterSpec {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .filter(|(name, _)| name != LIMIT_PARAM)
            .collect();
        Self { entries }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_op_prefixes() {
        assert_eq!(ComparisonOp::from_prefix(None), Some(ComparisonOp::Eq));
        assert_eq!(ComparisonOp::from_prefix(Some("=")), Some(ComparisonOp::Eq));
        assert_eq!(ComparisonOp::from_prefix(Some("<=")), Some(ComparisonOp::Lte));
        assert_eq!(ComparisonOp::from_prefix(Some(">")), Some(ComparisonOp::Gt));
        assert_eq!(ComparisonOp::from_prefix(Some("!=")), None);
        assert_eq!(ComparisonOp::Gte.as_sql(), ">=");
    }

    #[test]
    fn test_sql_params_indices_are_one_based() {
        let mut params = SqlParams::default();
        assert!(params.is_empty());
        assert_eq!(params.push(SqlValue::Int(1)), 1);
        assert_eq!(params.push(SqlValue::Text("x".into())), 2);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_filter_spec_skips_limit_and_last_wins() {
        let spec = FilterSpec::from_pairs([
            ("name".to_string(), "cow".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("name".to_string(), "eagles".to_string()),
        ]);
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.get("name"), Some("eagles"));
        assert_eq!(spec.get("limit"), None);
    }
}
