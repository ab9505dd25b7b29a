// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: a REST backend for logging workouts
//!
//! Users log in with a password to obtain an opaque bearer token, then
//! create and manage workouts made of ordered exercise entries. Every
//! workout is private to the user who created it.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use error::AppError;
use services::{Credential, TokenService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub tokens: TokenService,
    /// Checked against on logins for unknown users, at the configured cost
    pub placeholder_credential: Credential,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self, AppError> {
        let tokens = TokenService::new(db.clone());
        let placeholder_credential =
            Credential::from_plaintext("placeholder login credential", config.bcrypt_cost)?;
        Ok(Self {
            config,
            db,
            tokens,
            placeholder_credential,
        })
    }
}
