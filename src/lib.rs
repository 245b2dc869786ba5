// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Practice Room: rehearse difficult conversations with a voice persona.
//!
//! This crate provides the backend API that records practice sessions,
//! composes the persona prompt, and provisions rooms on the voice backend.
//! It also serves the user's email preferences.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::VoiceBackendClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub voice: VoiceBackendClient,
}
