// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use crate::services::credential::{Credential, MAX_PASSWORD_BYTES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Registered user as stored in the `users` table.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    /// Unique login name
    pub username: String,
    pub email: String,
    /// Password hash; never serialized
    #[serde(skip)]
    pub password_hash: Credential,
    /// Free-form profile text
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request body.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub bio: String,
}

/// bcrypt limits input by bytes, not characters.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long")
            .with_message("password must be at most 72 bytes".into()));
    }
    Ok(())
}
