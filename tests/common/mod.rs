// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use workout_tracker::config::Config;
use workout_tracker::db::Database;
use workout_tracker::models::{NewUser, User};
use workout_tracker::routes::create_router;
use workout_tracker::services::Credential;
use workout_tracker::AppState;

/// Default password for users created by these helpers.
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "hunter2hunter2";

/// Create a fresh, migrated in-memory database.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::connect(&Config::test_default())
        .await
        .expect("Failed to open in-memory database")
}

/// Create a test app backed by its own in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Database::connect(&config)
        .await
        .expect("Failed to open in-memory database");
    let state = Arc::new(AppState::new(config, db).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// Insert a user directly, bypassing the HTTP layer.
#[allow(dead_code)]
pub async fn create_user(db: &Database, username: &str) -> User {
    let new_user = NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: TEST_PASSWORD.to_string(),
        bio: String::new(),
    };
    let credential = Credential::from_plaintext(TEST_PASSWORD, 4).unwrap();
    db.create_user(&new_user, &credential).await.unwrap()
}

/// Send a request with an optional JSON body and bearer token.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register `username` and log in through the API. Returns the bearer token.
#[allow(dead_code)]
pub async fn register_and_login(app: &axum::Router, username: &str) -> String {
    let response = send(
        app,
        "POST",
        "/users",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": TEST_PASSWORD,
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        app,
        "POST",
        "/tokens/authentication",
        None,
        Some(json!({ "username": username, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["auth_token"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// A valid create-workout body with entries at the given order indices.
#[allow(dead_code)]
pub fn workout_body(order_indices: &[i64]) -> Value {
    let entries: Vec<Value> = order_indices
        .iter()
        .map(|&i| {
            json!({
                "exercise_name": format!("Exercise {}", i),
                "sets": 3,
                "reps": 10,
                "weight": 50.0,
                "notes": "",
                "order_index": i,
            })
        })
        .collect();

    json!({
        "title": "Push day",
        "description": "Upper body",
        "duration_minutes": 60,
        "calories_burned": 400,
        "entries": entries,
    })
}
