// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout aggregate persistence: ordering, atomic writes, partial updates.

use workout_tracker::db::{tables, Database};
use workout_tracker::error::AppError;
use workout_tracker::models::{NewWorkout, WorkoutEntryInput, WorkoutPatch};

mod common;

fn entry(name: &str, order_index: i64) -> WorkoutEntryInput {
    WorkoutEntryInput {
        id: None,
        exercise_name: name.to_string(),
        sets: 3,
        reps: Some(10),
        duration_seconds: None,
        weight: Some(60.0),
        notes: String::new(),
        order_index,
    }
}

fn new_workout(entries: Vec<WorkoutEntryInput>) -> NewWorkout {
    NewWorkout {
        title: "Leg day".to_string(),
        description: "Squats and friends".to_string(),
        duration_minutes: 45,
        calories_burned: 350,
        entries,
    }
}

async fn setup() -> (Database, i64) {
    let db = common::test_db().await;
    let user = common::create_user(&db, "alice").await;
    (db, user.id)
}

#[tokio::test]
async fn test_create_then_get_orders_entries() {
    let (db, owner) = setup().await;

    let created = db
        .create_workout(
            owner,
            &new_workout(vec![entry("Lunge", 2), entry("Squat", 0), entry("Deadlift", 1)]),
        )
        .await
        .unwrap();

    assert_eq!(created.user_id, owner);
    assert!(created.entries.iter().all(|e| e.id > 0));
    let names: Vec<_> = created
        .entries
        .iter()
        .map(|e| e.exercise_name.as_str())
        .collect();
    assert_eq!(names, ["Squat", "Deadlift", "Lunge"]);

    let fetched = db.get_workout(created.id).await.unwrap();
    assert_eq!(fetched.title, "Leg day");
    assert_eq!(fetched.duration_minutes, 45);
    let order: Vec<_> = fetched.entries.iter().map(|e| e.order_index).collect();
    assert_eq!(order, [0, 1, 2]);
    assert_eq!(fetched.entries[0].weight, Some(60.0));
}

#[tokio::test]
async fn test_create_requires_an_entry() {
    let (db, owner) = setup().await;

    let err = db
        .create_workout(owner, &new_workout(vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(db.count_rows(tables::WORKOUTS).await.unwrap(), 0);
}

#[tokio::test]
async fn test_entry_with_reps_and_duration_is_rejected() {
    let (db, owner) = setup().await;

    let mut both = entry("Plank", 1);
    both.duration_seconds = Some(60);

    let err = db
        .create_workout(owner, &new_workout(vec![entry("Squat", 0), both]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(db.count_rows(tables::WORKOUTS).await.unwrap(), 0);
    assert_eq!(db.count_rows(tables::WORKOUT_ENTRIES).await.unwrap(), 0);
}

#[tokio::test]
async fn test_failed_entry_insert_rolls_back_workout() {
    let (db, owner) = setup().await;

    // Passes the store's own checks but the schema refuses sets = 0
    let mut bad = entry("Squat", 1);
    bad.sets = 0;

    let err = db
        .create_workout(owner, &new_workout(vec![entry("Deadlift", 0), bad]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
    assert_eq!(db.count_rows(tables::WORKOUTS).await.unwrap(), 0);
    assert_eq!(db.count_rows(tables::WORKOUT_ENTRIES).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_owner_is_constraint_violation() {
    let (db, _) = setup().await;

    let err = db
        .create_workout(9999, &new_workout(vec![entry("Squat", 0)]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_get_missing_workout_is_not_found() {
    let (db, _) = setup().await;

    assert!(matches!(
        db.get_workout(42).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        db.get_workout_owner(42).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_update_keeps_omitted_fields() {
    let (db, owner) = setup().await;
    let created = db
        .create_workout(owner, &new_workout(vec![entry("Squat", 0)]))
        .await
        .unwrap();

    let patch = WorkoutPatch {
        title: Some("Heavy leg day".to_string()),
        ..Default::default()
    };
    let updated = db.update_workout(created.id, &patch).await.unwrap();

    assert_eq!(updated.title, "Heavy leg day");
    assert_eq!(updated.description, "Squats and friends");
    assert_eq!(updated.duration_minutes, 45);
    assert_eq!(updated.calories_burned, 350);
    assert_eq!(updated.entries.len(), 1);
}

#[tokio::test]
async fn test_update_upserts_entries_by_id() {
    let (db, owner) = setup().await;
    let created = db
        .create_workout(owner, &new_workout(vec![entry("Squat", 0), entry("Lunge", 1)]))
        .await
        .unwrap();
    let squat_id = created.entries[0].id;
    let lunge_id = created.entries[1].id;

    let mut changed = entry("Front squat", 0);
    changed.id = Some(squat_id);
    changed.sets = 5;
    let added = entry("Calf raise", 2);

    let patch = WorkoutPatch {
        entries: Some(vec![changed, added]),
        ..Default::default()
    };
    let updated = db.update_workout(created.id, &patch).await.unwrap();

    assert_eq!(updated.entries.len(), 3);
    assert_eq!(updated.entries[0].id, squat_id);
    assert_eq!(updated.entries[0].exercise_name, "Front squat");
    assert_eq!(updated.entries[0].sets, 5);
    assert_eq!(updated.entries[1].id, lunge_id);
    assert_eq!(updated.entries[2].exercise_name, "Calf raise");
    assert_eq!(db.count_rows(tables::WORKOUT_ENTRIES).await.unwrap(), 3);
}

#[tokio::test]
async fn test_update_never_touches_other_workouts_entries() {
    let (db, owner) = setup().await;
    let first = db
        .create_workout(owner, &new_workout(vec![entry("Squat", 0)]))
        .await
        .unwrap();
    let second = db
        .create_workout(owner, &new_workout(vec![entry("Bench", 0)]))
        .await
        .unwrap();

    let mut foreign = entry("Hijacked", 1);
    foreign.id = Some(first.entries[0].id);
    let patch = WorkoutPatch {
        entries: Some(vec![foreign]),
        ..Default::default()
    };
    let updated = db.update_workout(second.id, &patch).await.unwrap();

    // The foreign ID is ignored and the entry is added to this workout instead
    assert_eq!(updated.entries.len(), 2);
    assert_ne!(updated.entries[1].id, first.entries[0].id);
    let untouched = db.get_workout(first.id).await.unwrap();
    assert_eq!(untouched.entries[0].exercise_name, "Squat");
}

#[tokio::test]
async fn test_failed_update_leaves_workout_unchanged() {
    let (db, owner) = setup().await;
    let created = db
        .create_workout(owner, &new_workout(vec![entry("Squat", 0)]))
        .await
        .unwrap();

    let mut bad = entry("Broken", 1);
    bad.sets = 0;
    let patch = WorkoutPatch {
        title: Some("Renamed".to_string()),
        entries: Some(vec![entry("Lunge", 2), bad]),
        ..Default::default()
    };

    let err = db.update_workout(created.id, &patch).await.unwrap_err();
    assert!(matches!(err, AppError::ConstraintViolation(_)));

    let after = db.get_workout(created.id).await.unwrap();
    assert_eq!(after.title, "Leg day");
    assert_eq!(after.entries.len(), 1);
}

#[tokio::test]
async fn test_update_missing_workout_is_not_found() {
    let (db, _) = setup().await;

    let err = db
        .update_workout(7, &WorkoutPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_cascades_entries() {
    let (db, owner) = setup().await;
    let created = db
        .create_workout(owner, &new_workout(vec![entry("Squat", 0), entry("Lunge", 1)]))
        .await
        .unwrap();
    assert_eq!(db.get_workout_owner(created.id).await.unwrap(), owner);

    db.delete_workout(created.id).await.unwrap();

    assert_eq!(db.count_rows(tables::WORKOUTS).await.unwrap(), 0);
    assert_eq!(db.count_rows(tables::WORKOUT_ENTRIES).await.unwrap(), 0);
    assert!(matches!(
        db.delete_workout(created.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}
