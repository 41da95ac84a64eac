//! HTTP route handlers
//!
//! `/calories/*` routes are served at the root and again under `/api/v1`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::cors::setup_cors;
use super::HttpError;
use crate::build_info;
use crate::config::Config;
use crate::table::NutritionTable;
use crate::tools::lookup::{self, CalorieDataResponse};
use crate::tools::recipe::{self, RecipeTotals};
use crate::tools::status::{ServiceStatus, StatusTracker};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<NutritionTable>,
    pub status: Arc<StatusTracker>,
}

impl AppState {
    pub fn new(table: Arc<NutritionTable>, table_source: impl Into<String>) -> Self {
        let status = StatusTracker::new(table_source, table.len());
        Self {
            table,
            status: Arc::new(status),
        }
    }
}

/// Request body for the recipe route: a bare line-item array, or an object
/// holding one under `ingredients`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeRequest {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(default)]
        ingredients: Option<Vec<Value>>,
    },
}

impl RecipeRequest {
    pub fn ingredients(&self) -> Option<&[Value]> {
        match self {
            RecipeRequest::Bare(items) => Some(items.as_slice()),
            RecipeRequest::Wrapped { ingredients } => ingredients.as_deref(),
        }
    }
}

/// Query string accepted by `/calories`
#[derive(Debug, Deserialize)]
pub struct CaloriesQuery {
    pub ingredient: Option<String>,
}

/// One row of the table listing
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub ingredient: String,
    pub unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Response for the table listing
#[derive(Debug, Serialize)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientSummary>,
    pub count: usize,
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to the {}", build_info::SERVICE_TITLE),
        "description": build_info::DESCRIPTION,
        "version": build_info::VERSION,
        "health": "/health",
        "endpoints": {
            "ingredients": "/calories",
            "lookup": "/calories?ingredient={ingredient}",
            "calories": "/calories/{ingredient}",
            "recipe": "/calories/recipe",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.status.get_status())
}

/// `?ingredient=` performs a lookup; a bare request lists the table
async fn calories_index(
    State(state): State<AppState>,
    Query(query): Query<CaloriesQuery>,
) -> Result<Response, HttpError> {
    match query.ingredient {
        Some(ingredient) => {
            debug!(%ingredient, "calorie lookup by query");
            let data = lookup::get_calorie_data(&state.table, Some(ingredient.as_str()))?;
            Ok(Json(data).into_response())
        }
        None => Ok(list_ingredients(&state.table).into_response()),
    }
}

fn list_ingredients(table: &NutritionTable) -> Json<ListIngredientsResponse> {
    let ingredients: Vec<IngredientSummary> = table
        .iter()
        .map(|(key, record)| IngredientSummary {
            ingredient: key.to_string(),
            unit: record.unit.clone(),
            calories: record.nutrition.calories,
            protein: record.nutrition.protein,
            carbs: record.nutrition.carbs,
            fat: record.nutrition.fat,
        })
        .collect();
    let count = ingredients.len();
    Json(ListIngredientsResponse { ingredients, count })
}

async fn get_calories(
    State(state): State<AppState>,
    Path(ingredient): Path<String>,
) -> Result<Json<CalorieDataResponse>, HttpError> {
    debug!(%ingredient, "calorie lookup");
    let data = lookup::get_calorie_data(&state.table, Some(ingredient.as_str()))?;
    Ok(Json(data))
}

async fn calculate_recipe(
    State(state): State<AppState>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeTotals>, HttpError> {
    let Json(request) = body.map_err(|e| HttpError::BadRequest(e.body_text()))?;
    let totals = recipe::calculate_recipe_calories(&state.table, request.ingredients())?;
    Ok(Json(totals))
}

async fn not_found() -> HttpError {
    HttpError::NotFound
}

async fn method_not_allowed() -> HttpError {
    HttpError::MethodNotAllowed
}

fn calorie_routes() -> Router<AppState> {
    Router::new()
        .route("/calories", get(calories_index).fallback(method_not_allowed))
        .route("/calories/recipe", post(calculate_recipe).fallback(method_not_allowed))
        .route("/calories/:ingredient", get(get_calories).fallback(method_not_allowed))
}

/// Routes without middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(calorie_routes())
        .nest("/api/v1", calorie_routes())
        .fallback(not_found)
        .with_state(state)
}

/// Routes with CORS and request tracing
pub fn app(state: AppState, config: &Config) -> Router {
    router(state)
        .layer(setup_cors(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: AppState, config: &Config) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
