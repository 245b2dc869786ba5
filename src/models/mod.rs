// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod perspective;
pub mod practice;
pub mod user;

pub use perspective::{Card, PerspectiveSession};
pub use practice::{NewPracticeSession, PracticeSession, PracticeStatus};
pub use user::{EmailPreferences, StoredEmailPreferences, User};
