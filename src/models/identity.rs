// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller identity resolved by the authentication middleware.

use crate::models::User;

/// Who is making the current request.
///
/// Every request that passes through [`crate::middleware::auth::authenticate`]
/// carries exactly one of these as a request extension. `Anonymous` means
/// "no login"; a request with no `Identity` at all never went through the
/// middleware and is a routing bug.
#[derive(Debug, Clone)]
pub enum Identity {
    Authenticated(User),
    Anonymous,
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}
