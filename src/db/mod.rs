// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`Database`] is a cheap-to-clone handle over either the process-wide
//! PostgreSQL pool or an in-memory store used by tests.

pub mod memory;
pub mod pool;
pub mod postgres;

use crate::error::AppError;
use crate::models::{Card, NewPracticeSession, PerspectiveSession, PracticeSession, User};
use chrono::Utc;
use memory::MemoryStore;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory(Arc<RwLock<MemoryStore>>),
}

/// Database handle shared through `AppState`.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

/// Parse a client-supplied ID. Malformed IDs cannot match any row.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

impl Database {
    /// Wrap a PostgreSQL pool (normally [`pool::init_global`]'s).
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            backend: Backend::Postgres(pool),
        }
    }

    /// Create an empty in-memory database.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(MemoryStore::default()))),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Map an identity-provider subject to a stored user.
    pub async fn find_user_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => postgres::find_user_by_external_id(pool, external_id).await,
            Backend::Memory(store) => Ok(store.read().await.find_user_by_external_id(external_id)),
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => postgres::get_user(pool, id).await,
            Backend::Memory(store) => Ok(store.read().await.get_user(id)),
        }
    }

    /// Register a user known to the identity provider.
    pub async fn insert_user(&self, external_id: &str, email: &str) -> Result<User, AppError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            external_id: external_id.to_string(),
            email: email.to_string(),
            email_preferences: None,
            created_at: now,
            updated_at: now,
        };

        match &self.backend {
            Backend::Postgres(pool) => postgres::insert_user(pool, &user).await?,
            Backend::Memory(store) => store.write().await.insert_user(user.clone())?,
        }
        Ok(user)
    }

    /// Replace a user's stored preference blob. Returns `None` if the user is gone.
    pub async fn set_email_preferences(
        &self,
        user_id: Uuid,
        preferences: serde_json::Value,
    ) -> Result<Option<User>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                postgres::set_email_preferences(pool, user_id, &preferences).await
            }
            Backend::Memory(store) => Ok(store
                .write()
                .await
                .set_email_preferences(user_id, preferences)),
        }
    }

    // ─── Perspective Session Operations ──────────────────────────

    /// Store a perspective session with cards in the given order.
    pub async fn insert_perspective_session(
        &self,
        user_id: Uuid,
        cards: &[(&str, &str)],
    ) -> Result<PerspectiveSession, AppError> {
        let id = Uuid::new_v4();
        let session = PerspectiveSession {
            id,
            user_id,
            created_at: Utc::now(),
            cards: cards
                .iter()
                .zip(0..)
                .map(|(&(title, content), position)| Card {
                    id: Uuid::new_v4(),
                    perspective_session_id: id,
                    title: title.to_string(),
                    content: content.to_string(),
                    position,
                })
                .collect(),
        };

        match &self.backend {
            Backend::Postgres(pool) => postgres::insert_perspective_session(pool, &session).await?,
            Backend::Memory(store) => store
                .write()
                .await
                .insert_perspective_session(session.clone())?,
        }
        Ok(session)
    }

    /// Load a perspective session and all of its cards, ordered.
    pub async fn get_perspective_session_with_cards(
        &self,
        id: Uuid,
    ) -> Result<Option<PerspectiveSession>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => postgres::get_perspective_session_with_cards(pool, id).await,
            Backend::Memory(store) => Ok(store.read().await.get_perspective_session_with_cards(id)),
        }
    }

    // ─── Practice Session Operations ─────────────────────────────

    /// Insert a new `pending` practice session.
    pub async fn create_practice_session(
        &self,
        new: NewPracticeSession,
    ) -> Result<PracticeSession, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => postgres::create_practice_session(pool, new).await,
            Backend::Memory(store) => store.write().await.create_practice_session(new),
        }
    }

    /// Mark a practice session `active` with its room URL.
    ///
    /// The row was created earlier in the same request, so a missing row is
    /// a storage fault rather than a client error.
    pub async fn activate_practice_session(
        &self,
        id: Uuid,
        room_url: &str,
    ) -> Result<(), AppError> {
        let updated = match &self.backend {
            Backend::Postgres(pool) => {
                postgres::activate_practice_session(pool, id, room_url).await?
            }
            Backend::Memory(store) => store.write().await.activate_practice_session(id, room_url),
        };

        if updated {
            Ok(())
        } else {
            Err(AppError::Database(format!(
                "practice session {id} vanished before activation"
            )))
        }
    }

    pub async fn get_practice_session(
        &self,
        id: Uuid,
    ) -> Result<Option<PracticeSession>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => postgres::get_practice_session(pool, id).await,
            Backend::Memory(store) => Ok(store.read().await.get_practice_session(id)),
        }
    }

    pub async fn list_practice_sessions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PracticeSession>, AppError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                postgres::list_practice_sessions_for_user(pool, user_id).await
            }
            Backend::Memory(store) => {
                Ok(store.read().await.list_practice_sessions_for_user(user_id))
            }
        }
    }
}
