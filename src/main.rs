//! Calorie Service
//!
//! Serves ingredient nutrition lookups and recipe totals over HTTP, or over
//! MCP stdio when `CALORIE_SERVICE_TRANSPORT=stdio`.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::info;
use tracing_subscriber::EnvFilter;

use calorie_service::build_info;
use calorie_service::config::{Config, Transport};
use calorie_service::http::{self, AppState};
use calorie_service::mcp::CalorieService;
use calorie_service::table::{NutritionTable, TableResult};

/// Load the override table if configured, otherwise the bundled one
fn load_table(config: &Config) -> TableResult<(NutritionTable, String)> {
    match &config.table_path {
        Some(path) => Ok((NutritionTable::load(path)?, path.display().to_string())),
        None => Ok((NutritionTable::builtin()?, "builtin".to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("calorie_service=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env()?;

    let (table, table_source) = load_table(&config)?;
    info!(ingredients = table.len(), source = %table_source, "Nutrition table loaded");

    let state = AppState::new(Arc::new(table), table_source);

    match config.transport {
        Transport::Http => {
            http::serve(state, &config).await?;
        }
        Transport::Stdio => {
            eprintln!("Starting MCP server on stdio...");
            let service = CalorieService::new(state.table, state.status);
            let server = service.serve((stdin(), stdout())).await?;
            server.waiting().await?;
        }
    }

    info!("Calorie service stopped");
    Ok(())
}
