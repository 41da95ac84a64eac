//! Calorie lookup tool
//!
//! Resolves a free-text ingredient name against the nutrition table: exact
//! key first, then substring containment in table order.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::NutritionRecord;
use crate::table::store::canonical_key;
use crate::table::NutritionTable;

/// Number of table keys offered when nothing matches
pub const SUGGESTION_LIMIT: usize = 20;

/// How a lookup was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    LocalDatabase,
    PartialMatch,
}

/// Lookup failure types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Ingredient name is required")]
    MissingInput,

    #[error("No calorie data found for '{name}'")]
    NotFound { name: String, available: Vec<String> },
}

/// A resolved table entry
#[derive(Debug, Clone, Copy)]
pub struct LookupHit<'a> {
    /// Canonical key whose values were used
    pub key: &'a str,
    pub record: &'a NutritionRecord,
    pub source: MatchSource,
}

/// Response for get_calorie_data
#[derive(Debug, Serialize)]
pub struct CalorieDataResponse {
    pub ingredient: String,
    pub calories: f64,
    pub unit: String,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub source: MatchSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_from: Option<String>,
}

impl From<&LookupHit<'_>> for CalorieDataResponse {
    fn from(hit: &LookupHit<'_>) -> Self {
        let n = &hit.record.nutrition;
        Self {
            ingredient: hit.key.to_string(),
            calories: n.calories,
            unit: hit.record.unit.clone(),
            protein: n.protein,
            carbs: n.carbs,
            fat: n.fat,
            source: hit.source,
            matched_from: match hit.source {
                MatchSource::PartialMatch => Some(hit.key.to_string()),
                MatchSource::LocalDatabase => None,
            },
        }
    }
}

/// Failure body for get_calorie_data
#[derive(Debug, Serialize)]
pub struct LookupErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_ingredients: Option<Vec<String>>,
}

impl From<&LookupError> for LookupErrorResponse {
    fn from(err: &LookupError) -> Self {
        match err {
            LookupError::MissingInput => Self {
                error: err.to_string(),
                suggestion: None,
                available_ingredients: None,
            },
            LookupError::NotFound { available, .. } => Self {
                error: err.to_string(),
                suggestion: Some(format!(
                    "Try one of these ingredients: {}",
                    available.join(", ")
                )),
                available_ingredients: Some(available.clone()),
            },
        }
    }
}

/// Resolve an ingredient name to a table record
pub fn lookup<'a>(table: &'a NutritionTable, name: Option<&str>) -> Result<LookupHit<'a>, LookupError> {
    let name = name.map(canonical_key).unwrap_or_default();
    if name.is_empty() {
        return Err(LookupError::MissingInput);
    }

    // Exact key wins over any partial candidate ("milk" vs "almond milk")
    if let Some((key, record)) = table.get_entry(&name) {
        return Ok(LookupHit {
            key,
            record,
            source: MatchSource::LocalDatabase,
        });
    }

    if let Some((key, record)) = table
        .iter()
        .find(|(k, _)| k.contains(name.as_str()) || name.contains(k))
    {
        debug!(query = %name, matched = key, "partial ingredient match");
        return Ok(LookupHit {
            key,
            record,
            source: MatchSource::PartialMatch,
        });
    }

    Err(LookupError::NotFound {
        available: table.keys().take(SUGGESTION_LIMIT).map(str::to_string).collect(),
        name,
    })
}

/// Lookup rendered as a JSON-ready response
pub fn get_calorie_data(
    table: &NutritionTable,
    name: Option<&str>,
) -> Result<CalorieDataResponse, LookupError> {
    lookup(table, name).map(|hit| CalorieDataResponse::from(&hit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> NutritionTable {
        NutritionTable::builtin().unwrap()
    }

    #[test]
    fn test_every_key_resolves_exactly() {
        let table = table();
        for (key, record) in table.iter() {
            let hit = lookup(&table, Some(key)).unwrap();
            assert_eq!(hit.source, MatchSource::LocalDatabase);
            assert_eq!(hit.key, key);
            assert_eq!(hit.record, record);
        }
    }

    #[test]
    fn test_input_is_normalized() {
        let table = table();
        let hit = lookup(&table, Some("  BaNaNa ")).unwrap();
        assert_eq!(hit.source, MatchSource::LocalDatabase);
        assert_eq!(hit.key, "banana");
    }

    #[test]
    fn test_exact_match_beats_partial() {
        let table = table();
        assert_eq!(lookup(&table, Some("milk")).unwrap().key, "milk");
        assert_eq!(lookup(&table, Some("almond milk")).unwrap().key, "almond milk");
    }

    #[test]
    fn test_partial_match_uses_table_order() {
        let table = table();
        // "ripe banana" contains "banana"
        let hit = lookup(&table, Some("ripe banana")).unwrap();
        assert_eq!(hit.source, MatchSource::PartialMatch);
        assert_eq!(hit.key, "banana");

        // "coconut" is a substring of coconut milk, coconut oil, ...; first in order wins
        let hit = lookup(&table, Some("coconut")).unwrap();
        assert_eq!(hit.key, "coconut milk");
    }

    #[test]
    fn test_partial_match_response_carries_matched_from() {
        let table = table();
        let response = get_calorie_data(&table, Some("skim milk")).unwrap();
        assert_eq!(response.ingredient, "milk");
        assert_eq!(response.matched_from.as_deref(), Some("milk"));
        assert_eq!(response.source, MatchSource::PartialMatch);
        assert_eq!(response.calories, 42.0);
    }

    #[test]
    fn test_exact_response_omits_matched_from() {
        let table = table();
        let json = serde_json::to_value(get_calorie_data(&table, Some("banana")).unwrap()).unwrap();
        assert_eq!(json["source"], "local_database");
        assert_eq!(json["calories"], 89.0);
        assert!(json.get("matched_from").is_none());
    }

    #[test]
    fn test_missing_input() {
        let table = table();
        assert_eq!(lookup(&table, None).unwrap_err(), LookupError::MissingInput);
        assert_eq!(lookup(&table, Some("")).unwrap_err(), LookupError::MissingInput);
        assert_eq!(lookup(&table, Some("   ")).unwrap_err(), LookupError::MissingInput);
    }

    #[test]
    fn test_not_found_suggests_first_twenty_keys() {
        let table = table();
        let err = lookup(&table, Some("doesnotexist")).unwrap_err();
        let expected: Vec<String> = table.keys().take(20).map(String::from).collect();
        assert_eq!(
            err,
            LookupError::NotFound {
                name: "doesnotexist".to_string(),
                available: expected.clone(),
            }
        );

        let body = LookupErrorResponse::from(&err);
        assert_eq!(body.error, "No calorie data found for 'doesnotexist'");
        assert!(body.suggestion.unwrap().starts_with("Try one of these ingredients: milk, almond milk"));
        assert_eq!(body.available_ingredients.unwrap(), expected);
    }
}
