//! Nutrition basis handling
//!
//! Parses record units into the reference quantity used for scaling.

pub mod units;

pub use units::{categorize_unit, parse_basis, BaseUnitType, Basis};
