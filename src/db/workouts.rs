// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout aggregate store.
//!
//! A workout and its entries are written as one unit: every multi-statement
//! write runs in a single transaction. `sqlx::Transaction` rolls back when
//! dropped, so any early return (an error, or the request future being
//! cancelled) discards the partial write. Only an explicit `commit()` persists.

use super::Database;
use crate::error::AppError;
use crate::models::{NewWorkout, Workout, WorkoutEntry, WorkoutEntryInput, WorkoutPatch};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

/// Reject entries the schema would refuse, before any statement is issued.
fn validate_entries(entries: &[WorkoutEntryInput]) -> Result<(), AppError> {
    for entry in entries {
        if !entry.has_reps_xor_duration() {
            return Err(AppError::Validation(format!(
                "entry '{}' must set exactly one of reps or duration_seconds",
                entry.exercise_name
            )));
        }
    }
    Ok(())
}

/// Insert one entry row and return its generated ID.
async fn insert_entry(
    conn: &mut SqliteConnection,
    workout_id: i64,
    entry: &WorkoutEntryInput,
) -> Result<i64, AppError> {
    let id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO workout_entries (
            workout_id, exercise_name, sets, reps, duration_seconds, weight, notes, order_index
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        ",
    )
    .bind(workout_id)
    .bind(&entry.exercise_name)
    .bind(entry.sets)
    .bind(entry.reps)
    .bind(entry.duration_seconds)
    .bind(entry.weight)
    .bind(&entry.notes)
    .bind(entry.order_index)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

/// Update an entry in place if it belongs to `workout_id`. Returns whether it did.
async fn update_entry(
    conn: &mut SqliteConnection,
    workout_id: i64,
    entry_id: i64,
    entry: &WorkoutEntryInput,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r"
        UPDATE workout_entries
        SET exercise_name = $1,
            sets = $2,
            reps = $3,
            duration_seconds = $4,
            weight = $5,
            notes = $6,
            order_index = $7
        WHERE id = $8 AND workout_id = $9
        ",
    )
    .bind(&entry.exercise_name)
    .bind(entry.sets)
    .bind(entry.reps)
    .bind(entry.duration_seconds)
    .bind(entry.weight)
    .bind(&entry.notes)
    .bind(entry.order_index)
    .bind(entry_id)
    .bind(workout_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

fn entry_from_input(id: i64, entry: &WorkoutEntryInput) -> WorkoutEntry {
    WorkoutEntry {
        id,
        exercise_name: entry.exercise_name.clone(),
        sets: entry.sets,
        reps: entry.reps,
        duration_seconds: entry.duration_seconds,
        weight: entry.weight,
        notes: entry.notes.clone(),
        order_index: entry.order_index,
    }
}

fn sort_entries(entries: &mut [WorkoutEntry]) {
    entries.sort_by_key(|e| (e.order_index, e.id));
}

/// Fold the rows of the workout/entries join into one aggregate.
fn workout_from_rows(rows: &[SqliteRow]) -> Result<Option<Workout>, sqlx::Error> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let mut workout = Workout {
        id: first.try_get("workout_id")?,
        user_id: first.try_get("user_id")?,
        title: first.try_get("title")?,
        description: first.try_get("description")?,
        duration_minutes: first.try_get("duration_minutes")?,
        calories_burned: first.try_get("calories_burned")?,
        entries: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        // LEFT JOIN: a workout without entries yields one row of NULL entry columns
        let Some(entry_id) = row.try_get::<Option<i64>, _>("entry_id")? else {
            continue;
        };
        workout.entries.push(WorkoutEntry {
            id: entry_id,
            exercise_name: row.try_get("exercise_name")?,
            sets: row.try_get("sets")?,
            reps: row.try_get("reps")?,
            duration_seconds: row.try_get("duration_seconds")?,
            weight: row.try_get("weight")?,
            notes: row.try_get("notes")?,
            order_index: row.try_get("order_index")?,
        });
    }

    sort_entries(&mut workout.entries);
    Ok(Some(workout))
}

impl Database {
    /// Create a workout and all of its entries atomically.
    ///
    /// A workout needs at least one entry. If any entry insert fails, nothing
    /// is stored.
    pub async fn create_workout(
        &self,
        owner_id: i64,
        new_workout: &NewWorkout,
    ) -> Result<Workout, AppError> {
        if new_workout.entries.is_empty() {
            return Err(AppError::Validation(
                "a workout needs at least one entry".to_string(),
            ));
        }
        validate_entries(&new_workout.entries)?;

        let mut tx = self.pool().begin().await?;

        let workout_id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO workouts (user_id, title, description, duration_minutes, calories_burned)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(owner_id)
        .bind(&new_workout.title)
        .bind(&new_workout.description)
        .bind(new_workout.duration_minutes)
        .bind(new_workout.calories_burned)
        .fetch_one(&mut *tx)
        .await?;

        let mut entries = Vec::with_capacity(new_workout.entries.len());
        for entry in &new_workout.entries {
            let entry_id = insert_entry(&mut tx, workout_id, entry).await?;
            entries.push(entry_from_input(entry_id, entry));
        }

        tx.commit().await?;

        sort_entries(&mut entries);

        tracing::info!(
            workout_id,
            owner_id,
            entries = entries.len(),
            "Workout created"
        );

        Ok(Workout {
            id: workout_id,
            user_id: owner_id,
            title: new_workout.title.clone(),
            description: new_workout.description.clone(),
            duration_minutes: new_workout.duration_minutes,
            calories_burned: new_workout.calories_burned,
            entries,
        })
    }

    /// Fetch a workout with its entries in `order_index` order.
    pub async fn get_workout(&self, workout_id: i64) -> Result<Workout, AppError> {
        let rows = sqlx::query(
            r"
            SELECT
                w.id AS workout_id,
                w.user_id,
                w.title,
                w.description,
                w.duration_minutes,
                w.calories_burned,
                e.id AS entry_id,
                e.exercise_name,
                e.sets,
                e.reps,
                e.duration_seconds,
                e.weight,
                e.notes,
                e.order_index
            FROM workouts w
            LEFT JOIN workout_entries e ON e.workout_id = w.id
            WHERE w.id = $1
            ORDER BY e.order_index, e.id
            ",
        )
        .bind(workout_id)
        .fetch_all(self.pool())
        .await?;

        workout_from_rows(&rows)?
            .ok_or_else(|| AppError::NotFound(format!("workout {} not found", workout_id)))
    }

    /// Apply a partial update, upserting any supplied entries, in one transaction.
    ///
    /// An entry whose `id` belongs to this workout is updated in place. Entries
    /// without an `id`, or with an ID this workout does not own, are inserted
    /// as new rows. Entries left out of the patch are kept.
    pub async fn update_workout(
        &self,
        workout_id: i64,
        patch: &WorkoutPatch,
    ) -> Result<Workout, AppError> {
        if let Some(entries) = &patch.entries {
            validate_entries(entries)?;
        }

        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r"
            UPDATE workouts
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                duration_minutes = COALESCE($3, duration_minutes),
                calories_burned = COALESCE($4, calories_burned)
            WHERE id = $5
            ",
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.duration_minutes)
        .bind(patch.calories_burned)
        .bind(workout_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "workout {} not found",
                workout_id
            )));
        }

        let mut inserted = 0usize;
        let mut updated = 0usize;
        for entry in patch.entries.iter().flatten() {
            let updated_in_place = match entry.id {
                Some(entry_id) => update_entry(&mut tx, workout_id, entry_id, entry).await?,
                None => false,
            };
            if updated_in_place {
                updated += 1;
            } else {
                insert_entry(&mut tx, workout_id, entry).await?;
                inserted += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(workout_id, updated, inserted, "Workout updated");

        self.get_workout(workout_id).await
    }

    /// Delete a workout. Its entries are removed by the schema's cascade.
    pub async fn delete_workout(&self, workout_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(workout_id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "workout {} not found",
                workout_id
            )));
        }

        tracing::info!(workout_id, "Workout deleted");
        Ok(())
    }

    /// Owner of a workout, for authorization before any access.
    pub async fn get_workout_owner(&self, workout_id: i64) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT user_id FROM workouts WHERE id = $1")
            .bind(workout_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("workout {} not found", workout_id)))
    }
}
