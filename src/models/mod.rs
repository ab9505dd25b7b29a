// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod identity;
pub mod token;
pub mod user;
pub mod workout;

pub use identity::Identity;
pub use token::Token;
pub use user::{NewUser, User};
pub use workout::{NewWorkout, Workout, WorkoutEntry, WorkoutEntryInput, WorkoutPatch};
