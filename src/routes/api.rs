// SPDX-License-Identifier: MIT

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Food, Meal, User, UserStats};
use crate::services::meals::{NewMeal, NewMealItem};
use crate::time_utils::parse_iso_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/foods", get(get_foods))
        .route("/api/meals", get(get_meals).post(create_meal))
        .route("/api/meals/{id}", delete(delete_meal))
        .route("/api/stats", get(get_stats))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>> {
    let profile = state.db.get_user(user.user_id)?.ok_or_else(|| {
        crate::error::AppError::NotFound(format!("User {} not found", user.user_id))
    })?;
    Ok(Json(profile))
}

// ─── Food Catalog ────────────────────────────────────────────

#[derive(Deserialize)]
struct FoodsQuery {
    /// Search term matched against name and category
    q: Option<String>,
}

#[derive(Serialize)]
pub struct FoodsResponse {
    pub foods: Vec<Food>,
}

/// Browse or search the food catalog.
async fn get_foods(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FoodsQuery>,
) -> Json<FoodsResponse> {
    let foods = match params.q.as_deref() {
        Some(term) if !term.trim().is_empty() => state
            .catalog
            .search(term.trim())
            .into_iter()
            .cloned()
            .collect(),
        _ => state.catalog.foods().to_vec(),
    };
    Json(FoodsResponse { foods })
}

// ─── Meals ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct MealsQuery {
    /// Single-day filter (ISO date); mutually exclusive with from/to
    date: Option<String>,
    /// Inclusive range start (ISO date)
    from: Option<String>,
    /// Inclusive range end (ISO date)
    to: Option<String>,
}

#[derive(Serialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
    pub total: u32,
}

fn parse_date_param(raw: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    raw.map(|raw| {
        parse_iso_date(raw).ok_or_else(|| {
            crate::error::AppError::BadRequest(format!(
                "Invalid '{name}' parameter: must be an ISO date (YYYY-MM-DD)"
            ))
        })
    })
    .transpose()
}

/// List the user's meals, newest date first.
async fn get_meals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MealsQuery>,
) -> Result<Json<MealsResponse>> {
    let date = parse_date_param(params.date.as_deref(), "date")?;
    let from = parse_date_param(params.from.as_deref(), "from")?;
    let to = parse_date_param(params.to.as_deref(), "to")?;

    if date.is_some() && (from.is_some() || to.is_some()) {
        return Err(crate::error::AppError::BadRequest(
            "'date' cannot be combined with 'from'/'to'".to_string(),
        ));
    }

    let meals = match date {
        Some(date) => state.meal_service.meals_on(user.user_id, date)?,
        None => state.meal_service.meals_for(user.user_id, from, to)?,
    };

    let total = meals.len() as u32;
    Ok(Json(MealsResponse { meals, total }))
}

#[derive(Deserialize)]
pub struct CreateMealItem {
    pub food_id: String,
    pub grams: f64,
}

#[derive(Deserialize)]
pub struct CreateMealRequest {
    #[serde(rename = "type")]
    pub meal_type: crate::models::MealType,
    /// Calendar day the meal counts toward (ISO date)
    pub date: NaiveDate,
    /// Display time; defaults to the current wall clock
    pub time: Option<String>,
    pub foods: Vec<CreateMealItem>,
}

#[derive(Serialize)]
pub struct MealMutationResponse {
    pub meal: Option<Meal>,
    /// Fresh stats, absent when the best-effort stats update failed
    pub stats: Option<UserStats>,
}

/// Log a meal.
async fn create_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealMutationResponse>)> {
    let new_meal = NewMeal {
        meal_type: body.meal_type,
        date: body.date,
        time: body.time,
        items: body
            .foods
            .into_iter()
            .map(|f| NewMealItem {
                food_id: f.food_id,
                grams: f.grams,
            })
            .collect(),
    };

    let logged = state.meal_service.log_meal(user.user_id, new_meal)?;
    Ok((
        StatusCode::CREATED,
        Json(MealMutationResponse {
            meal: Some(logged.meal),
            stats: logged.stats,
        }),
    ))
}

/// Delete a meal and rebuild the user's stats.
async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<MealMutationResponse>> {
    let deleted = state
        .meal_service
        .delete_meal(user.user_id, meal_id)?
        .ok_or_else(|| crate::error::AppError::NotFound(format!("Meal {meal_id} not found")))?;

    Ok(Json(MealMutationResponse {
        meal: None,
        stats: deleted.stats,
    }))
}

// ─── Stats ───────────────────────────────────────────────────

/// Get the user's stats aggregate (zeroed default if never initialized).
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserStats>> {
    let stats = state.stats_service.get_stats(user.user_id)?;
    Ok(Json(stats))
}
