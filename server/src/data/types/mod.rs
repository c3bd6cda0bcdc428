//! Shared data types for all database backends
//!
//! Types produced by the catalog services (table schemas) and by the query
//! executor (normalized rows plus field descriptors), identical for
//! PostgreSQL and SQLite.

mod result;
mod schema;

pub use result::{FieldDescriptor, FieldType, QueryResult, Row};
pub use schema::{ColumnSchema, ColumnType, TableSchema};
