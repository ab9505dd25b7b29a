// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token model.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Token scope labels. A token only verifies under the scope it was issued for.
pub mod scopes {
    pub const AUTHENTICATION: &str = "authentication";
}

/// A freshly issued token.
///
/// Only `plaintext` and `expiry` are ever sent to the client, and only once.
/// The database keeps `digest`, never the plaintext.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    #[serde(rename = "token")]
    pub plaintext: String,
    #[serde(skip)]
    pub digest: String,
    #[serde(skip)]
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
    #[serde(skip)]
    pub scope: String,
}
