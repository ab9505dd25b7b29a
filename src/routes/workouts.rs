// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes. All of them require a logged-in caller, and everything
//! addressing a specific workout is limited to its owner.

use crate::error::{AppError, Result};
use crate::models::{Identity, NewWorkout, Workout, WorkoutPatch};
use crate::services::authorize_owner;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workouts", post(create_workout))
        .route(
            "/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route_layer(middleware::from_fn(
            crate::middleware::require_authenticated,
        ))
}

#[derive(Serialize)]
pub struct WorkoutResponse {
    pub workout: Workout,
}

fn parse_workout_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| AppError::Validation("invalid workout id".to_string()))
}

/// Get one of the caller's workouts.
async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    identity: Identity,
) -> Result<Json<WorkoutResponse>> {
    let workout_id = parse_workout_id(&raw_id)?;

    let owner_id = state.db.get_workout_owner(workout_id).await?;
    authorize_owner(owner_id, &identity)?;

    let workout = state.db.get_workout(workout_id).await?;
    Ok(Json(WorkoutResponse { workout }))
}

/// Create a workout owned by the caller.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    payload: std::result::Result<Json<NewWorkout>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let user = identity.user().ok_or(AppError::Unauthenticated)?;
    let Json(new_workout) = payload?;
    new_workout.validate()?;

    let workout = state.db.create_workout(user.id, &new_workout).await?;

    Ok((StatusCode::CREATED, Json(WorkoutResponse { workout })))
}

/// Partially update one of the caller's workouts.
async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    identity: Identity,
    payload: std::result::Result<Json<WorkoutPatch>, JsonRejection>,
) -> Result<Json<WorkoutResponse>> {
    let workout_id = parse_workout_id(&raw_id)?;

    let owner_id = state.db.get_workout_owner(workout_id).await?;
    authorize_owner(owner_id, &identity)?;

    let Json(patch) = payload?;
    patch.validate()?;

    let workout = state.db.update_workout(workout_id, &patch).await?;
    Ok(Json(WorkoutResponse { workout }))
}

/// Delete one of the caller's workouts.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    identity: Identity,
) -> Result<StatusCode> {
    let workout_id = parse_workout_id(&raw_id)?;

    let owner_id = state.db.get_workout_owner(workout_id).await?;
    authorize_owner(owner_id, &identity)?;

    state.db.delete_workout(workout_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
