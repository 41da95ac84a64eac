//! Calorie service status tool
//!
//! Provides runtime status information about the service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info;

/// Usage notes for MCP clients
pub const USAGE_INSTRUCTIONS: &str = r#"
# Calorie Lookup Instructions

## Single ingredient
Call `get_calorie_data` with an ingredient name. Names are matched
case-insensitively. An exact table key is used when present, otherwise the
first table key that contains (or is contained by) the name.

- `source: "local_database"` means an exact match.
- `source: "partial_match"` means `matched_from` names the entry used.
- Unknown names return `error`, `suggestion`, and `available_ingredients`.

## Recipes
Call `calculate_recipe_calories` with a list of `{ingredient, amount}`.

| Record unit       | amount means      | default |
|-------------------|-------------------|---------|
| kcal per 100g     | grams             | 100     |
| kcal per 100ml    | milliliters       | 100     |
| kcal per egg      | number of eggs    | 1       |

Lines that cannot be resolved are listed with an `error` and do not count
toward the totals. `serving_size` is the number of lines supplied.
Totals are rounded to one decimal place.
"#;

/// Runtime status of the calorie service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,

    /// Build information
    pub version: &'static str,
    pub profile: &'static str,
    pub timestamp: String,

    /// Table information
    pub table_source: String,
    pub ingredient_count: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
#[derive(Debug)]
pub struct StatusTracker {
    start_time: Instant,
    table_source: String,
    ingredient_count: usize,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(table_source: impl Into<String>, ingredient_count: usize) -> Self {
        Self {
            start_time: Instant::now(),
            table_source: table_source.into(),
            ingredient_count,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ServiceStatus {
        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            status: "healthy",
            service: build_info::SERVICE_TITLE,
            version: build_info::VERSION,
            profile: build_info::PROFILE,
            timestamp: chrono::Utc::now().to_rfc3339(),
            table_source: self.table_source.clone(),
            ingredient_count: self.ingredient_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
