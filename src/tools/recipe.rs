//! Recipe calorie tool
//!
//! Sums scaled nutrition across a recipe's line items. Failed lines are
//! reported in place and never contribute to the totals.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::lookup::{lookup, LookupError};
use crate::models::{round1, Nutrition};
use crate::table::NutritionTable;

/// Amount reported for a failed line that gave none
///
/// A failed line has no record and so no basis; it always reports 100 even
/// though a resolved per-item line with no amount reports 1.
pub const DEFAULT_AMOUNT: f64 = 100.0;

/// Whole-request failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("Ingredients list is required")]
    MissingInput,
}

/// Why a single line produced no numbers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineFailure {
    #[error("Line item must be an object with an 'ingredient' name")]
    Malformed,

    #[error("amount must be a non-negative number")]
    InvalidAmount,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// One requested ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeLineItem {
    pub ingredient: String,
    /// Quantity in the record's basis units; defaults to the basis quantity
    pub amount: Option<f64>,
}

/// A line item that could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub ingredient: Option<String>,
    pub amount: Option<f64>,
    pub reason: LineFailure,
}

impl RecipeLineItem {
    pub fn new(ingredient: impl Into<String>, amount: Option<f64>) -> Self {
        Self {
            ingredient: ingredient.into(),
            amount,
        }
    }

    /// Read a line item from loosely-typed JSON
    pub fn from_value(value: &Value) -> Result<Self, RejectedLine> {
        let Some(obj) = value.as_object() else {
            return Err(RejectedLine {
                ingredient: None,
                amount: None,
                reason: LineFailure::Malformed,
            });
        };

        let raw_amount = obj.get("amount").filter(|v| !v.is_null());
        let Some(ingredient) = obj.get("ingredient").and_then(Value::as_str) else {
            return Err(RejectedLine {
                ingredient: None,
                amount: raw_amount.and_then(Value::as_f64),
                reason: LineFailure::Malformed,
            });
        };

        let amount = match raw_amount {
            None => None,
            Some(v) => match v.as_f64() {
                Some(n) => Some(n),
                None => {
                    return Err(RejectedLine {
                        ingredient: Some(ingredient.to_string()),
                        amount: None,
                        reason: LineFailure::InvalidAmount,
                    })
                }
            },
        };

        Ok(Self::new(ingredient, amount))
    }
}

/// Scaled breakdown for one resolved line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeLineSuccess {
    pub ingredient: String,
    pub amount: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub unit: String,
}

/// Failure marker for one line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeLineFailure {
    pub ingredient: Option<String>,
    /// Given amount, or [`DEFAULT_AMOUNT`] for a lookup failure with none
    pub amount: Option<f64>,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecipeLineResult {
    Success(RecipeLineSuccess),
    Failure(RecipeLineFailure),
}

impl RecipeLineResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RecipeLineResult::Success(_))
    }

    fn failure(ingredient: Option<String>, amount: Option<f64>, reason: &LineFailure) -> Self {
        RecipeLineResult::Failure(RecipeLineFailure {
            ingredient,
            amount,
            error: reason.to_string(),
        })
    }
}

/// Response for calculate_recipe_calories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeTotals {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub ingredients: Vec<RecipeLineResult>,
    /// Number of line items supplied, including failed ones
    pub serving_size: usize,
}

/// Aggregate typed line items
pub fn aggregate(
    table: &NutritionTable,
    items: &[RecipeLineItem],
) -> Result<RecipeTotals, AggregateError> {
    if items.is_empty() {
        return Err(AggregateError::MissingInput);
    }
    Ok(aggregate_lines(table, items.iter().cloned().map(Ok)))
}

/// Aggregate loosely-typed JSON line items as received over the wire
pub fn calculate_recipe_calories(
    table: &NutritionTable,
    items: Option<&[Value]>,
) -> Result<RecipeTotals, AggregateError> {
    match items {
        Some(items) if !items.is_empty() => Ok(aggregate_lines(
            table,
            items.iter().map(RecipeLineItem::from_value),
        )),
        _ => Err(AggregateError::MissingInput),
    }
}

fn aggregate_lines<I>(table: &NutritionTable, lines: I) -> RecipeTotals
where
    I: Iterator<Item = Result<RecipeLineItem, RejectedLine>>,
{
    let mut contributions: Vec<Nutrition> = Vec::new();
    let mut results = Vec::new();

    for line in lines {
        let item = match line {
            Ok(item) => item,
            Err(rejected) => {
                results.push(RecipeLineResult::failure(
                    rejected.ingredient,
                    rejected.amount,
                    &rejected.reason,
                ));
                continue;
            }
        };

        if item.amount.is_some_and(|a| !a.is_finite() || a < 0.0) {
            results.push(RecipeLineResult::failure(
                Some(item.ingredient),
                item.amount,
                &LineFailure::InvalidAmount,
            ));
            continue;
        }

        let hit = match lookup(table, Some(item.ingredient.as_str())) {
            Ok(hit) => hit,
            Err(err) => {
                results.push(RecipeLineResult::failure(
                    Some(item.ingredient),
                    Some(item.amount.unwrap_or(DEFAULT_AMOUNT)),
                    &LineFailure::from(err),
                ));
                continue;
            }
        };

        let amount = item.amount.unwrap_or(hit.record.basis.quantity);
        let scaled = hit.record.nutrition * hit.record.multiplier_for(amount);
        contributions.push(scaled);

        let shown = scaled.rounded();
        results.push(RecipeLineResult::Success(RecipeLineSuccess {
            ingredient: item.ingredient,
            amount,
            calories: shown.calories,
            protein: shown.protein,
            carbs: shown.carbs,
            fat: shown.fat,
            unit: hit.record.unit.clone(),
        }));
    }

    debug!(
        lines = results.len(),
        resolved = results.iter().filter(|r| r.is_success()).count(),
        "aggregated recipe"
    );

    // Sum un-rounded contributions; rounding happens once below
    let totals: Nutrition = contributions.into_iter().sum();

    RecipeTotals {
        total_calories: round1(totals.calories),
        total_protein: round1(totals.protein),
        total_carbs: round1(totals.carbs),
        total_fat: round1(totals.fat),
        serving_size: results.len(),
        ingredients: results,
    }
}
