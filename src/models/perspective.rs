// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Perspective sessions and their cards (read-only in this service).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prior perspective session, with cards eagerly loaded.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PerspectiveSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Ordered by `position`
    #[sqlx(skip)]
    pub cards: Vec<Card>,
}

/// A single perspective bullet (title + content).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    pub id: Uuid,
    pub perspective_session_id: Uuid,
    pub title: String,
    pub content: String,
    pub position: i32,
}
