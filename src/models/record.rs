//! Nutrition record model
//!
//! One canonical ingredient's nutrition facts plus its measurement basis.

use serde::Deserialize;

use super::Nutrition;
use crate::nutrition::Basis;

/// Nutrition facts for one canonical ingredient name
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionRecord {
    pub nutrition: Nutrition,
    /// Display basis, e.g. "kcal per 100g"
    pub unit: String,
    pub basis: Basis,
}

impl NutritionRecord {
    /// Multiplier that converts `amount` (in basis units) into record-sized portions
    pub fn multiplier_for(&self, amount: f64) -> f64 {
        amount / self.basis.quantity
    }
}

/// Raw table entry as stored in the JSON data file
#[derive(Debug, Clone, Deserialize)]
pub struct TableEntry {
    pub name: String,
    pub calories: f64,
    pub unit: String,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl TableEntry {
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}
