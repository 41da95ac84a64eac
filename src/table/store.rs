//! Nutrition table storage
//!
//! An immutable, insertion-ordered mapping from canonical ingredient name to
//! [`NutritionRecord`]. Built once at start-up and shared behind an `Arc`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{NutritionRecord, TableEntry};
use crate::nutrition::parse_basis;

/// Bundled ingredient data
pub const BUILTIN_TABLE_JSON: &str = include_str!("../../data/nutrition_table.json");

/// Table construction error types
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Duplicate ingredient key: '{0}'")]
    DuplicateKey(String),

    #[error("Ingredient key cannot be empty")]
    EmptyKey,

    #[error("Nutrition table contains no ingredients")]
    NoIngredients,

    #[error("Invalid nutrition values for '{0}': values must be finite and non-negative")]
    InvalidValues(String),

    #[error("Unsupported unit '{unit}' for '{name}'")]
    UnsupportedUnit { name: String, unit: String },

    #[error("Failed to parse nutrition table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read nutrition table: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// On-disk table layout
#[derive(Debug, Deserialize)]
struct TableFile {
    ingredients: Vec<TableEntry>,
}

/// Read-only ingredient table
///
/// Iteration order is insertion order; partial matching relies on it as the
/// tie-break between several candidate keys.
#[derive(Debug, Clone)]
pub struct NutritionTable {
    entries: Vec<(String, NutritionRecord)>,
    index: HashMap<String, usize>,
}

impl NutritionTable {
    /// Build a table from raw entries, validating every one
    pub fn from_entries<I>(entries: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = TableEntry>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for entry in entries {
            let key = canonical_key(&entry.name);
            if key.is_empty() {
                return Err(TableError::EmptyKey);
            }
            if table.index.contains_key(&key) {
                return Err(TableError::DuplicateKey(key));
            }

            let nutrition = entry.nutrition();
            if !nutrition.is_valid() {
                return Err(TableError::InvalidValues(key));
            }

            let basis = parse_basis(&entry.unit).ok_or_else(|| TableError::UnsupportedUnit {
                name: key.clone(),
                unit: entry.unit.clone(),
            })?;

            table.index.insert(key.clone(), table.entries.len());
            table.entries.push((
                key,
                NutritionRecord {
                    nutrition,
                    unit: entry.unit,
                    basis,
                },
            ));
        }

        if table.is_empty() {
            return Err(TableError::NoIngredients);
        }

        Ok(table)
    }

    /// Parse a table from its JSON representation
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        let file: TableFile = serde_json::from_str(json)?;
        Self::from_entries(file.ingredients)
    }

    /// Load a table from a JSON file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The bundled ingredient table
    pub fn builtin() -> TableResult<Self> {
        Self::from_json_str(BUILTIN_TABLE_JSON)
    }

    /// Exact lookup returning the stored key alongside the record
    pub fn get_entry(&self, key: &str) -> Option<(&str, &NutritionRecord)> {
        self.index
            .get(key)
            .map(|&i| (self.entries[i].0.as_str(), &self.entries[i].1))
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutritionRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase and trim an ingredient name
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase()
}
