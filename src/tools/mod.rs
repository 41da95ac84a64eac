//! Calorie tools module
//!
//! Transport-independent implementations shared by the HTTP and MCP surfaces.

pub mod lookup;
pub mod recipe;
pub mod status;
