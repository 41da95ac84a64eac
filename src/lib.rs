//! Calorie Service Library
//!
//! Ingredient nutrition lookup and recipe calorie aggregation over a static
//! in-memory table, served over HTTP or MCP.

pub mod build_info;
pub mod config;
pub mod http;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod table;
pub mod tools;
