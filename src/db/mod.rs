// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite via sqlx).
//!
//! Provides high-level operations for:
//! - Users (profile and password hash)
//! - Tokens (digests of issued bearer tokens)
//! - Workouts (workout + ordered entries, persisted as one unit)

pub mod tokens;
pub mod users;
pub mod workouts;

use crate::config::Config;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    pub const TOKENS: &str = "tokens";
    pub const WORKOUTS: &str = "workouts";
    pub const WORKOUT_ENTRIES: &str = "workout_entries";
}

/// Shared database handle. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config` and apply pending migrations.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppError::Database(format!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `sqlite::memory:` is its own database, so an
        // in-memory pool must stay on a single connection that never expires.
        let in_memory = config.database_url.contains(":memory:");
        let max_connections = if in_memory {
            1
        } else {
            config.db_max_connections
        };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30));
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            AppError::Database(format!("Failed to connect to database: {}", e))
        })?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(max_connections, in_memory, "Connected to database");
        Ok(db)
    }

    /// Apply migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))
    }

    /// Underlying pool, for health checks and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of rows in `table`.
    pub async fn count_rows(&self, table: &str) -> Result<i64, AppError> {
        // Table names come from `tables`, never from user input.
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
