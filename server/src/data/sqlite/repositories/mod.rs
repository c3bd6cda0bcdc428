//! SQLite repository functions

pub mod catalog;
