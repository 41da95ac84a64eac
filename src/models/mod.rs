//! Data models
//!
//! Rust structs representing nutrition table entities.

mod nutrition;
mod record;

pub use nutrition::{round1, Nutrition};
pub use record::{NutritionRecord, TableEntry};
