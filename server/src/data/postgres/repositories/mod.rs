//! PostgreSQL repository functions

pub mod catalog;
