//! Calorie MCP Server Implementation
//!
//! Implements the MCP server with the calorie tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::table::NutritionTable;
use crate::tools::lookup::{self, LookupErrorResponse};
use crate::tools::recipe;
use crate::tools::status::StatusTracker;

/// Calorie MCP Service
#[derive(Clone)]
pub struct CalorieService {
    table: Arc<NutritionTable>,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<CalorieService>,
}

impl CalorieService {
    pub fn new(table: Arc<NutritionTable>, status_tracker: Arc<StatusTracker>) -> Self {
        Self {
            table,
            status_tracker,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCalorieDataParams {
    /// Ingredient name, matched case-insensitively
    pub ingredient: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateRecipeParams {
    /// Line items: {"ingredient": "banana", "amount": 120}. amount is grams,
    /// milliliters, or a count depending on the ingredient's unit.
    pub ingredients: Option<Vec<Value>>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CalorieService {
    #[tool(description = "Get the current status of the calorie service including build info, table size, and process information")]
    fn calorie_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for looking up ingredients and calculating recipe calories, including how amounts are interpreted per unit.")]
    fn calorie_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    #[tool(description = "Get calories, protein, carbs, and fat for an ingredient. Falls back to a partial name match and suggests known ingredients when nothing matches.")]
    fn get_calorie_data(&self, Parameters(p): Parameters<GetCalorieDataParams>) -> Result<CallToolResult, McpError> {
        let json = match lookup::get_calorie_data(&self.table, p.ingredient.as_deref()) {
            Ok(data) => serde_json::to_string_pretty(&data),
            Err(err) => serde_json::to_string_pretty(&LookupErrorResponse::from(&err)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Calculate total calories, protein, carbs, and fat for a list of ingredients with amounts. Unresolved ingredients are reported per line and excluded from totals.")]
    fn calculate_recipe_calories(&self, Parameters(p): Parameters<CalculateRecipeParams>) -> Result<CallToolResult, McpError> {
        let json = match recipe::calculate_recipe_calories(&self.table, p.ingredients.as_deref()) {
            Ok(totals) => serde_json::to_string_pretty(&totals),
            Err(err) => serde_json::to_string_pretty(&json!({ "error": err.to_string() })),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List every ingredient in the nutrition table, in table order")]
    fn list_ingredients(&self) -> Result<CallToolResult, McpError> {
        let names: Vec<&str> = self.table.keys().collect();
        let json = serde_json::to_string_pretty(&json!({ "ingredients": names, "count": names.len() }))
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CalorieService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: crate::build_info::NAME.into(),
                version: crate::build_info::VERSION.into(),
                title: Some(crate::build_info::SERVICE_TITLE.into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Calorie Service - ingredient nutrition lookup and recipe totals. \
                 Call calorie_instructions first if unsure how amounts are interpreted. \
                 Lookup: get_calorie_data, list_ingredients. \
                 Recipes: calculate_recipe_calories. \
                 Status: calorie_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CalorieService {
        let table = NutritionTable::builtin().unwrap();
        let tracker = StatusTracker::new("builtin", table.len());
        CalorieService::new(Arc::new(table), Arc::new(tracker))
    }

    /// Parse the JSON document carried in a tool result's first text block
    fn body(result: CallToolResult) -> Value {
        let wire = serde_json::to_value(&result).unwrap();
        let text = wire["content"][0]["text"].as_str().expect("text content");
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_get_calorie_data_hit() {
        let params = GetCalorieDataParams { ingredient: Some("Almond Milk".to_string()) };
        let json = body(service().get_calorie_data(Parameters(params)).unwrap());
        assert_eq!(json["ingredient"], "almond milk");
        assert_eq!(json["source"], "local_database");
        assert_eq!(json["calories"], 15.0);
    }

    #[test]
    fn test_get_calorie_data_not_found_renders_suggestions() {
        let params = GetCalorieDataParams { ingredient: Some("unobtainium".to_string()) };
        let json = body(service().get_calorie_data(Parameters(params)).unwrap());
        assert_eq!(json["error"], "No calorie data found for 'unobtainium'");
        assert_eq!(json["available_ingredients"].as_array().unwrap().len(), 20);
        assert!(json["suggestion"].as_str().unwrap().contains("milk, almond milk"));
    }

    #[test]
    fn test_get_calorie_data_missing_name() {
        let params = GetCalorieDataParams { ingredient: None };
        let json = body(service().get_calorie_data(Parameters(params)).unwrap());
        assert_eq!(json, json!({ "error": "Ingredient name is required" }));
    }

    #[test]
    fn test_calculate_recipe_calories_totals() {
        let params = CalculateRecipeParams {
            ingredients: Some(vec![
                json!({ "ingredient": "banana", "amount": 200 }),
                json!({ "ingredient": "chia eggs", "amount": 2 }),
            ]),
        };
        let json = body(service().calculate_recipe_calories(Parameters(params)).unwrap());
        assert_eq!(json["total_calories"], 308.0);
        assert_eq!(json["serving_size"], 2);
    }

    #[test]
    fn test_calculate_recipe_calories_requires_list() {
        let params = CalculateRecipeParams { ingredients: None };
        let json = body(service().calculate_recipe_calories(Parameters(params)).unwrap());
        assert_eq!(json, json!({ "error": "Ingredients list is required" }));
    }

    #[test]
    fn test_list_ingredients_and_status() {
        let svc = service();
        let listing = body(svc.list_ingredients().unwrap());
        assert_eq!(listing["count"], 53);
        assert_eq!(listing["ingredients"][0], "milk");

        let status = body(svc.calorie_status().unwrap());
        assert_eq!(status["ingredient_count"], 53);
        assert_eq!(status["status"], "healthy");
    }
}
