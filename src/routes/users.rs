// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration.

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use crate::services::Credential;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(register_user))
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Register a new user.
async fn register_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let Json(new_user) = payload?;
    new_user.validate()?;

    let password = new_user.password.clone();
    let cost = state.config.bcrypt_cost;
    let credential =
        tokio::task::spawn_blocking(move || Credential::from_plaintext(&password, cost))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e))
            })??;

    let user = state.db.create_user(&new_user, &credential).await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}
