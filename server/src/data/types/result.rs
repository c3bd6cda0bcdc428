//! Normalized query result types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One result row: column name to JSON value, in result column order
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Engine-specific type tag of a result field
///
/// PostgreSQL reports the type OID, SQLite the declared type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Oid(u32),
    Name(String),
}

/// Name and type tag of one result column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    #[schema(value_type = Object)]
    pub type_tag: FieldType,
}

/// Rows and fields returned for a table query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryResult {
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<Row>,
    pub fields: Vec<FieldDescriptor>,
}
