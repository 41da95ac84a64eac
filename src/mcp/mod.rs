//! MCP transport
//!
//! Serves the calorie tools over stdio.

mod server;

pub use server::{CalculateRecipeParams, CalorieService, GetCalorieDataParams};
