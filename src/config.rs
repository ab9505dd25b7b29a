// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use chrono::{TimeDelta, Utc};
use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLx connection URL, e.g. `sqlite://workouts.db`
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Lifetime of authentication tokens issued at login
    pub token_ttl: TimeDelta,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_or("PORT", 8080)?,
            token_ttl: parse_ttl_hours("TOKEN_TTL_HOURS", 24)?,
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    /// Config for tests: private in-memory database and a cheap bcrypt cost.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            token_ttl: TimeDelta::hours(24),
            bcrypt_cost: 4,
        }
    }
}

/// Read an optional numeric variable, falling back to `default` when unset.
fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Read a lifetime in hours. It must be positive and an expiry computed from
/// it must be representable.
fn parse_ttl_hours(name: &'static str, default: i64) -> Result<TimeDelta, ConfigError> {
    let hours: i64 = parse_or(name, default)?;
    TimeDelta::try_hours(hours)
        .filter(|ttl| *ttl > TimeDelta::zero())
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or(ConfigError::Invalid(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
