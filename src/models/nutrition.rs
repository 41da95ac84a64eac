//! Shared nutrition data structure
//!
//! Used by table records, lookup hits, and recipe line results.

use serde::{Deserialize, Serialize};

/// Nutritional information
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }

    /// Round every field to one decimal place for display
    pub fn rounded(&self) -> Self {
        Self {
            calories: round1(self.calories),
            protein: round1(self.protein),
            carbs: round1(self.carbs),
            fat: round1(self.fat),
        }
    }

    /// True when every field is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_sum() {
        let banana = Nutrition { calories: 89.0, protein: 1.1, carbs: 23.0, fat: 0.3 };
        let total: Nutrition = vec![banana * 2.0, banana].into_iter().sum();
        assert!((total.calories - 267.0).abs() < 1e-9);
        assert!((total.protein - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(178.04), 178.0);
        assert_eq!(round1(0.66), 0.7);
        assert_eq!(round1(2.25 + 1e-9), 2.3);
    }

    #[test]
    fn test_is_valid_rejects_negative_and_nan() {
        assert!(Nutrition::zero().is_valid());
        assert!(!Nutrition { calories: -1.0, ..Nutrition::zero() }.is_valid());
        assert!(!Nutrition { fat: f64::NAN, ..Nutrition::zero() }.is_valid());
    }
}
