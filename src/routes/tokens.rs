// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login (token issuance) and logout.

use crate::error::{AppError, Result};
use crate::models::token::scopes;
use crate::models::{Identity, Token};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::delete,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    // The login-only gate wraps logout alone; it is attached before `post`
    Router::new().route(
        "/tokens/authentication",
        delete(logout)
            .route_layer(middleware::from_fn(
                crate::middleware::require_authenticated,
            ))
            .post(create_auth_token),
    )
}

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct AuthTokenResponse {
    pub auth_token: Token,
}

/// Exchange username and password for a new authentication token.
///
/// Any earlier authentication tokens of the user are revoked.
async fn create_auth_token(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CreateTokenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthTokenResponse>)> {
    let Json(req) = payload?;

    // Unknown user and wrong password are indistinguishable to the client,
    // including in how long the bcrypt check takes
    let user = state.db.get_user_by_username(&req.username).await?;
    let credential = match &user {
        Some(user) => user.password_hash.clone(),
        None => state.placeholder_credential.clone(),
    };

    let password = req.password;
    let matches = tokio::task::spawn_blocking(move || credential.verify(&password))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e))
        })??;

    let user = match user {
        Some(user) if matches => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "Login with wrong password");
            return Err(AppError::InvalidCredential);
        }
        None => {
            tracing::info!(username = %req.username, "Login for unknown user");
            return Err(AppError::InvalidCredential);
        }
    };

    state
        .tokens
        .revoke_all(user.id, scopes::AUTHENTICATION)
        .await?;
    let token = state
        .tokens
        .issue(user.id, state.config.token_ttl, scopes::AUTHENTICATION)
        .await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        StatusCode::CREATED,
        Json(AuthTokenResponse { auth_token: token }),
    ))
}

/// Revoke all of the caller's authentication tokens.
async fn logout(State(state): State<Arc<AppState>>, identity: Identity) -> Result<StatusCode> {
    let user = identity.user().ok_or(AppError::Unauthenticated)?;

    state
        .tokens
        .revoke_all(user.id, scopes::AUTHENTICATION)
        .await?;

    tracing::info!(user_id = user.id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}
