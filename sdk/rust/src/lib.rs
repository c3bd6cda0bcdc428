//! # TableLens
//!
//! Client for a TableLens server: list tables, read filtered rows, and drive
//! a per-column filter grid with debounced re-fetching.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tablelens::{TableBrowser, TableClient};
//!
//! # async fn run() -> Result<(), tablelens::ClientError> {
//! let client = TableClient::new("http://127.0.0.1:3001")?;
//! let browser = TableBrowser::new(Arc::new(client));
//!
//! for table in browser.tables().await? {
//!     println!("{table}");
//! }
//!
//! let controller = browser.controller("teams").await?;
//! controller.set_filter("id", ">10,<4");
//! controller.flush().await;
//! println!("{} rows", controller.snapshot().rows().len());
//! # Ok(())
//! # }
//! ```
//!
//! Numeric columns accept comma-separated terms such as `>10,<4` (OR within
//! a column). Text columns match a case-insensitive substring. Filters on
//! different columns are AND-ed. SQLite folds case for ASCII letters only;
//! PostgreSQL folds all of Unicode.

mod browser;
mod cache;
mod client;
mod controller;
mod error;
mod source;
mod types;

pub use browser::TableBrowser;
pub use cache::TableCache;
pub use client::TableClient;
pub use controller::{ControllerConfig, FilterController};
pub use error::{ClientError, TABLE_NOT_FOUND};
pub use source::TableSource;
pub use types::{ControllerState, FieldDescriptor, FieldType, QueryResult, Row, Snapshot, TableQuery};
