// SPDX-License-Identifier: MIT

//! Registration and session issuance.
//!
//! Password and login flows live outside this service; registration creates
//! the user record, initializes the stats aggregate, and hands back a session
//! token the frontend carries on every API call.

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::User;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/register", post(register))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: User,
}

/// Register a new user and initialize their stats record.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    let full_name = body.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(AppError::BadRequest("Full name is required".to_string()));
    }

    if state.db.find_user_by_email(&email)?.is_some() {
        return Err(AppError::BadRequest(
            "A user with this email already exists".to_string(),
        ));
    }

    let user = User {
        id: Uuid::new_v4(),
        email,
        full_name,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_user(&user)?;
    state.stats_service.initialize(user.id)?;

    tracing::info!(user_id = %user.id, "User registered");

    let token = create_jwt(user.id, &state.config.jwt_signing_key)?;
    Ok(Json(RegisterResponse { token, user }))
}
