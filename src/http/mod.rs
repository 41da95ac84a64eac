//! HTTP transport
//!
//! Exposes the calorie tools as a JSON API.

pub mod cors;
pub mod error;
pub mod routes;

pub use error::HttpError;
pub use routes::{app, router, serve, AppState};
