// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod credential;
pub mod ownership;
pub mod tokens;

pub use credential::Credential;
pub use ownership::authorize_owner;
pub use tokens::TokenService;
