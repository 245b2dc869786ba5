// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Practice session model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a practice session.
///
/// Sessions start `Pending` and move to `Active` once a room is provisioned.
/// There is no failed state: a session whose provisioning failed stays
/// `Pending` with no room URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "practice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PracticeStatus {
    Pending,
    Active,
}

/// Practice session stored in the `practice_sessions` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PracticeSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub perspective_session_id: Uuid,
    pub persona: String,
    pub persona_traits: Vec<String>,
    pub goal: String,
    pub context: String,
    /// Set together with `Active` status
    pub room_url: Option<String>,
    pub status: PracticeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new practice session.
#[derive(Debug, Clone)]
pub struct NewPracticeSession {
    pub user_id: Uuid,
    pub perspective_session_id: Uuid,
    pub persona: String,
    pub persona_traits: Vec<String>,
    pub goal: String,
    pub context: String,
}

impl NewPracticeSession {
    /// Materialize a `Pending` record with a fresh ID.
    pub fn into_pending(self, now: DateTime<Utc>) -> PracticeSession {
        PracticeSession {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            perspective_session_id: self.perspective_session_id,
            persona: self.persona,
            persona_traits: self.persona_traits,
            goal: self.goal,
            context: self.context,
            room_url: None,
            status: PracticeStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
