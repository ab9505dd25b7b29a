// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque bearer token issuance and verification.
//!
//! Tokens are 32 random bytes, base64url-encoded. Only the SHA-256 digest is
//! persisted, so a database leak does not yield usable tokens and a lost
//! token can only be replaced, never recovered.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{Token, User};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

/// Issues, verifies and revokes scoped bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    db: Database,
    rng: SystemRandom,
}

impl TokenService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            rng: SystemRandom::new(),
        }
    }

    /// Create and persist a token for `user_id`, valid for `ttl`.
    ///
    /// The returned [`Token`] is the only copy of the plaintext.
    pub async fn issue(&self, user_id: i64, ttl: Duration, scope: &str) -> Result<Token> {
        let expiry = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("token lifetime {} out of range", ttl))
        })?;
        let plaintext = generate_plaintext(&self.rng)?;
        let token = Token {
            digest: digest(&plaintext),
            plaintext,
            user_id,
            expiry,
            scope: scope.to_string(),
        };

        self.db.insert_token(&token).await?;

        tracing::debug!(user_id, scope, expiry = %token.expiry, "Token issued");
        Ok(token)
    }

    /// Resolve a presented plaintext to its user.
    ///
    /// Unknown, expired and wrong-scope tokens all yield `Ok(None)`.
    pub async fn verify(&self, scope: &str, plaintext: &str) -> Result<Option<User>> {
        self.db
            .get_user_for_token(scope, &digest(plaintext), Utc::now())
            .await
    }

    /// Delete every token of `scope` held by `user_id`. Idempotent.
    pub async fn revoke_all(&self, user_id: i64, scope: &str) -> Result<u64> {
        let revoked = self.db.delete_tokens_for_user(user_id, scope).await?;
        tracing::debug!(user_id, scope, revoked, "Tokens revoked");
        Ok(revoked)
    }
}

/// Generate a fresh random token string.
pub fn generate_plaintext(rng: &dyn SecureRandom) -> Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("system random source failed")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Hex-encoded SHA-256 digest of a token plaintext.
pub fn digest(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}
