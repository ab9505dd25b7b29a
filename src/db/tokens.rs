// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token digest persistence.

use super::Database;
use crate::error::AppError;
use crate::models::Token;

impl Database {
    /// Store a token's digest. The plaintext is not written.
    pub async fn insert_token(&self, token: &Token) -> Result<(), AppError> {
        sqlx::query(
            r"
            INSERT INTO tokens (hash, user_id, expiry, scope)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&token.digest)
        .bind(token.user_id)
        .bind(token.expiry.timestamp())
        .bind(&token.scope)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Delete all tokens for a user and scope. Returns how many were removed.
    pub async fn delete_tokens_for_user(&self, user_id: i64, scope: &str) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tokens WHERE scope = $1 AND user_id = $2")
            .bind(scope)
            .bind(user_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
