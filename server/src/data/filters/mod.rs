//! Dynamic filter compiler
//!
//! Turns per-column filter text from the query string into parameterized SQL
//! predicates, using the live table schema as the identifier allow-list.
//!
//! ## Usage
//!
//! ```
//! use tablelens_server::data::filters::{FilterSpec, SqlParams, build_where_clause};
//! use tablelens_server::data::sql::Backend;
//! use tablelens_server::data::types::{ColumnSchema, ColumnType, TableSchema};
//!
//! let schema = TableSchema::new(
//!     "teams",
//!     vec![ColumnSchema::new("id", ColumnType::Integer, "integer")],
//! );
//! let spec = FilterSpec::from_pairs([("id".to_string(), ">10,<3".to_string())]);
//! let mut params = SqlParams::default();
//! let compiled = build_where_clause(Backend::Postgres.dialect(), &schema, &spec, &mut params);
//! assert_eq!(compiled.clause.as_deref(), Some("WHERE (\"id\" > $1 OR \"id\" < $2)"));
//! assert_eq!(params.len(), 2);
//! ```

mod builder;
mod parser;
mod types;

pub use builder::{CompiledFilter, build_where_clause, compile_predicate};
pub use parser::{parse_numeric_term, parse_numeric_terms};
pub use types::{ComparisonOp, FilterSpec, NumericLiteral, NumericTerm, SqlParams, SqlValue};
