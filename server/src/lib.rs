//! TableLens server
//!
//! Browses the tables of a SQLite or PostgreSQL database and serves
//! filtered, row-limited reads over HTTP.

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod utils;
