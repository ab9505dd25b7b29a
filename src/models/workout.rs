// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout aggregate: a workout and its ordered entries.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored workout with its entries sorted by `order_index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    pub id: i64,
    /// Owning user ID
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i64,
    pub calories_burned: i64,
    pub entries: Vec<WorkoutEntry>,
}

/// One exercise within a workout.
///
/// Exactly one of `reps` and `duration_seconds` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutEntry {
    pub id: i64,
    pub exercise_name: String,
    pub sets: i64,
    pub reps: Option<i64>,
    pub duration_seconds: Option<i64>,
    /// Load, in the user's unit of choice
    pub weight: Option<f64>,
    pub notes: String,
    /// Display position; entries are returned sorted by this, not insertion order
    pub order_index: i64,
}

/// Entry as submitted by a client.
///
/// `id` is only meaningful in a [`WorkoutPatch`], where an ID belonging to the
/// workout selects the entry to update in place. It is ignored on create.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkoutEntryInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 200, message = "exercise_name must be 1-200 characters"))]
    pub exercise_name: String,
    #[validate(range(min = 1, message = "sets must be positive"))]
    pub sets: i64,
    #[validate(range(min = 1, message = "reps must be positive"))]
    pub reps: Option<i64>,
    #[validate(range(min = 1, message = "duration_seconds must be positive"))]
    pub duration_seconds: Option<i64>,
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: String,
    pub order_index: i64,
}

impl WorkoutEntryInput {
    /// Whether exactly one of reps or duration is given.
    pub fn has_reps_xor_duration(&self) -> bool {
        self.reps.is_some() != self.duration_seconds.is_some()
    }
}

/// Create request body. The owner is always the caller, never the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewWorkout {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "duration_minutes must not be negative"))]
    pub duration_minutes: i64,
    #[validate(range(min = 0, message = "calories_burned must not be negative"))]
    pub calories_burned: i64,
    #[validate(nested)]
    pub entries: Vec<WorkoutEntryInput>,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WorkoutPatch {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "duration_minutes must not be negative"))]
    pub duration_minutes: Option<i64>,
    #[validate(range(min = 0, message = "calories_burned must not be negative"))]
    pub calories_burned: Option<i64>,
    #[validate(nested)]
    pub entries: Option<Vec<WorkoutEntryInput>>,
}
