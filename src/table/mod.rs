//! Nutrition table module
//!
//! Builds and serves the read-only ingredient table.

pub mod store;

pub use store::{NutritionTable, TableError, TableResult, BUILTIN_TABLE_JSON};
