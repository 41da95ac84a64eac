//! Unit types and basis parsing
//!
//! Every table record states its values "per" some reference quantity. This
//! module turns the record's display unit into a typed [`Basis`].

/// Base unit type for a record's reference quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseUnitType {
    /// Stored per grams (solids, powders)
    Weight,
    /// Stored per milliliters (liquids)
    Volume,
    /// Stored per count/each (eggs, pieces)
    Count,
}

/// Reference quantity a record's values are expressed per
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub kind: BaseUnitType,
    pub quantity: f64,
}

/// Determine the unit type of a bare unit word
pub fn categorize_unit(unit: &str) -> Option<BaseUnitType> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match trimmed {
        "g" | "gram" | "grams" => Some(BaseUnitType::Weight),
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
            Some(BaseUnitType::Volume)
        }
        "egg" | "eggs" | "each" | "piece" | "pieces" | "item" | "items" | "count" | "unit"
        | "units" => Some(BaseUnitType::Count),
        _ => None,
    }
}

/// Parse a display unit such as "kcal per 100g" or "kcal per egg"
///
/// Returns `None` when the unit is not one of the supported bases.
pub fn parse_basis(unit: &str) -> Option<Basis> {
    let lower = unit.to_lowercase();
    let rest = lower.trim().strip_prefix("kcal")?.trim_start();
    let rest = rest.strip_prefix("per")?.trim();

    // Split leading number from unit word ("100g", "100 ml", "egg")
    let split = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let (number, word) = rest.split_at(split);

    let kind = categorize_unit(word)?;
    let quantity = if number.is_empty() {
        1.0
    } else {
        number.parse::<f64>().ok()?
    };

    if quantity <= 0.0 || !quantity.is_finite() {
        return None;
    }

    Some(Basis { kind, quantity })
}
