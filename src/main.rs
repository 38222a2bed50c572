// SPDX-License-Identifier: MIT

//! NaijaFit Tracker API Server
//!
//! Tracks meals composed of Nigerian foods and maintains per-user nutrition
//! statistics (daily-calorie averages, favorite food, logging streaks,
//! achievements).

use naijafit_tracker::{
    config::Config,
    db::Database,
    services::{FoodCatalog, MealService, StatsService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting NaijaFit Tracker API");

    // Open the blob store
    let db = Database::open(&config.data_dir).expect("Failed to open data directory");
    tracing::info!(dir = %config.data_dir.display(), "Blob store opened");

    // Load the food catalog
    let catalog = FoodCatalog::load_from_file(&config.food_catalog_path)
        .expect("Failed to load food catalog");
    tracing::info!(
        count = catalog.foods().len(),
        "Food catalog loaded"
    );

    // Build services
    let stats_service = StatsService::new(db.clone());
    let meal_service = MealService::new(db.clone(), catalog.clone(), stats_service.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        catalog,
        stats_service,
        meal_service,
    });

    // Build router
    let app = naijafit_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("naijafit_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
