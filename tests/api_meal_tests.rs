// SPDX-License-Identifier: MIT

//! End-to-end API tests for the meal-logging and stats endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse body")
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_health_check_is_public() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_api_requires_auth() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_me() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"email": "Adunni@Example.com", "full_name": "Adunni Okafor"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().expect("token").to_string();
    assert_eq!(body["user"]["email"], "adunni@example.com");

    let response = app
        .oneshot(authed("GET", "/api/me", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["full_name"], "Adunni Okafor");
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let (app, _state) = common::create_test_app();

    let request = || {
        Request::builder()
            .method("POST")
            .uri("/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"email": "kemi@example.com", "full_name": "Kemi Adebayo"}).to_string(),
            ))
            .unwrap()
    };

    let first = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_log_meal_returns_created_with_stats() {
    let (app, state) = common::create_test_app();
    let user_id = common::register_user(&state, "chidi@example.com");
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    let today = naijafit_tracker::time_utils::today_utc().to_string();
    let response = app
        .oneshot(authed(
            "POST",
            "/api/meals",
            &token,
            Some(json!({
                "type": "lunch",
                "date": today,
                "time": "12:30 PM",
                "foods": [
                    {"food_id": "jollof-rice", "grams": 200.0},
                    {"food_id": "grilled-tilapia", "grams": 150.0}
                ]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    // 200g of jollof (180 cal/100g) + 150g of tilapia (180 cal/100g)
    assert_eq!(body["meal"]["total_nutrition"]["calories"], 630.0);
    assert_eq!(body["stats"]["total_meals_logged"], 1);
    assert_eq!(body["stats"]["current_streak"], 1);
    assert_eq!(body["stats"]["favorite_food"], "Jollof Rice");
    assert!(body["stats"]["achievements"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a == "First Meal Logged"));
}

#[tokio::test]
async fn test_log_meal_with_unknown_food_is_rejected() {
    let (app, state) = common::create_test_app();
    let user_id = common::register_user(&state, "chidi@example.com");
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed(
            "POST",
            "/api/meals",
            &token,
            Some(json!({
                "type": "dinner",
                "date": "2024-01-05",
                "foods": [{"food_id": "pizza", "grams": 100.0}]
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_list_meals_with_date_filters() {
    let (app, state) = common::create_test_app();
    let user_id = common::register_user(&state, "kemi@example.com");
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    for date in ["2024-01-03", "2024-01-04", "2024-01-05"] {
        let response = app
            .clone()
            .oneshot(authed(
                "POST",
                "/api/meals",
                &token,
                Some(json!({
                    "type": "breakfast",
                    "date": date,
                    "foods": [{"food_id": "akamu", "grams": 200.0}]
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(authed(
            "GET",
            "/api/meals?from=2024-01-04&to=2024-01-05",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    // Newest date first.
    assert_eq!(body["meals"][0]["date"], "2024-01-05");

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/meals?date=2024-01-03", &token, None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);

    let response = app
        .oneshot(authed("GET", "/api/meals?date=yesterday", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_meal_recomputes_stats() {
    let (app, state) = common::create_test_app();
    let user_id = common::register_user(&state, "kemi@example.com");
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    let today = naijafit_tracker::time_utils::today_utc().to_string();
    let mut meal_ids = Vec::new();
    for food in ["akara", "moin-moin"] {
        let response = app
            .clone()
            .oneshot(authed(
                "POST",
                "/api/meals",
                &token,
                Some(json!({
                    "type": "breakfast",
                    "date": today,
                    "foods": [{"food_id": food, "grams": 100.0}]
                })),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        meal_ids.push(body["meal"]["id"].as_str().unwrap().to_string());
    }

    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/meals/{}", meal_ids[0]),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    // Only the moin-moin meal (140 cal per 100g) remains.
    assert_eq!(body["stats"]["total_meals_logged"], 1);
    assert_eq!(body["stats"]["average_daily_calories"], 140.0);
    assert_eq!(body["stats"]["favorite_food"], "Moin Moin");

    // Deleting again is a 404.
    let response = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/meals/{}", meal_ids[0]),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_endpoint_returns_zeroed_default_when_uninitialized() {
    let (app, state) = common::create_test_app();
    // A valid token for a user that never registered.
    let token = common::create_test_jwt(uuid::Uuid::new_v4(), &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed("GET", "/api/stats", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_meals_logged"], 0);
    assert_eq!(body["favorite_food"], "Not determined yet");
}

#[tokio::test]
async fn test_food_catalog_search() {
    let (app, state) = common::create_test_app();
    let user_id = common::register_user(&state, "chidi@example.com");
    let token = common::create_test_jwt(user_id, &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed("GET", "/api/foods?q=soup", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let foods = body["foods"].as_array().unwrap();
    assert!(!foods.is_empty());
    assert!(foods
        .iter()
        .all(|f| f["category"] == "Soups" || f["name"].as_str().unwrap().contains("Soup")));

    let response = app
        .oneshot(authed("GET", "/api/foods", &token, None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["foods"].as_array().unwrap().len(), 20);
}
