// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resource ownership checks.

use crate::error::{AppError, Result};
use crate::models::{Identity, User};

/// Allow the request only if `identity` is the recorded owner.
///
/// Call after loading the owner ID and before touching the resource.
pub fn authorize_owner(owner_id: i64, identity: &Identity) -> Result<&User> {
    let user = identity.user().ok_or(AppError::Unauthenticated)?;

    if user.id != owner_id {
        tracing::warn!(
            user_id = user.id,
            owner_id,
            "Blocked access to resource owned by another user"
        );
        return Err(AppError::Forbidden);
    }

    Ok(user)
}
