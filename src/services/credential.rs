// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password credentials (bcrypt).
//!
//! Hashing and verification are deliberately slow. Callers on the async
//! runtime should run them via `tokio::task::spawn_blocking`.

use crate::error::{AppError, Result};
use std::fmt;

/// bcrypt only reads this many bytes of input. Longer passwords are refused
/// instead of being silently cut short.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A stored bcrypt password hash. The plaintext is never kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: String,
}

impl Credential {
    /// Hash `plaintext` with the given bcrypt work factor.
    pub fn from_plaintext(plaintext: &str, cost: u32) -> Result<Self> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        let hash = bcrypt::hash(plaintext, cost)?;
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_hash(&self) -> &str {
        &self.hash
    }

    /// Check a candidate password.
    ///
    /// A wrong password is `Ok(false)`. An error means the stored hash itself
    /// is unusable.
    pub fn verify(&self, candidate: &str) -> Result<bool> {
        // No stored hash was made from a longer password
        if candidate.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(candidate, &self.hash)
            .map_err(|e| AppError::Hashing(format!("stored hash rejected: {}", e)))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
