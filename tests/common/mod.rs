// SPDX-License-Identifier: MIT

use naijafit_tracker::config::Config;
use naijafit_tracker::db::Database;
use naijafit_tracker::models::User;
use naijafit_tracker::routes::create_router;
use naijafit_tracker::services::{FoodCatalog, MealService, StatsService};
use naijafit_tracker::time_utils::format_utc_rfc3339;
use naijafit_tracker::AppState;
use std::sync::Arc;
use uuid::Uuid;

/// The seeded catalog, shared with the binary.
pub const CATALOG_JSON: &str = include_str!("../../data/nigerian_foods.json");

/// Create an in-memory test database.
#[allow(dead_code)]
pub fn test_db() -> Database {
    Database::in_memory()
}

#[allow(dead_code)]
pub fn test_catalog() -> FoodCatalog {
    FoodCatalog::load_from_json(CATALOG_JSON).expect("Failed to load seeded catalog")
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db();
    let catalog = test_catalog();
    let stats_service = StatsService::new(db.clone());
    let meal_service = MealService::new(db.clone(), catalog.clone(), stats_service.clone());

    let state = Arc::new(AppState {
        config,
        db,
        catalog,
        stats_service,
        meal_service,
    });

    (create_router(state.clone()), state)
}

/// Create a session token for a user id.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: Uuid, signing_key: &[u8]) -> String {
    naijafit_tracker::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create test JWT")
}

/// Register a user directly against the state (profile + initialized stats).
#[allow(dead_code)]
pub fn register_user(state: &AppState, email: &str) -> Uuid {
    let user = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: "Test User".to_string(),
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_user(&user).expect("Failed to create user");
    state
        .stats_service
        .initialize(user.id)
        .expect("Failed to initialize stats");
    user.id
}
