// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User persistence.

use super::Database;
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::services::credential::Credential;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, u.bio, u.created_at, u.updated_at";

/// Build a [`User`] from a row selected with [`USER_COLUMNS`].
fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: Credential::from_hash(row.try_get("password_hash")?),
        bio: row.try_get("bio")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

impl Database {
    /// Insert a new user. A taken username is a constraint violation.
    pub async fn create_user(
        &self,
        new_user: &NewUser,
        credential: &Credential,
    ) -> Result<User, AppError> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (username, email, password_hash, bio, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id
            ",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(credential.as_hash())
        .bind(&new_user.bio)
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        tracing::info!(user_id = id, username = %new_user.username, "User created");

        Ok(User {
            id,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: credential.clone(),
            bio: new_user.bio.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up a user by login name.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users u WHERE u.username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    /// Find the user holding an unexpired token with this digest and scope.
    pub async fn get_user_for_token(
        &self,
        scope: &str,
        digest: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, AppError> {
        let row = sqlx::query(&format!(
            r"
            SELECT {}
            FROM users u
            INNER JOIN tokens t ON t.user_id = u.id
            WHERE t.hash = $1
              AND t.scope = $2
              AND t.expiry > $3
            ",
            USER_COLUMNS
        ))
        .bind(digest)
        .bind(scope)
        .bind(now.timestamp())
        .fetch_optional(self.pool())
        .await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }
}
