// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory storage for tests. The server binary always uses PostgreSQL.
//!
//! Mirrors the semantics of the PostgreSQL queries, including card ordering
//! and the unique external ID constraint.

use crate::error::AppError;
use crate::models::{
    NewPracticeSession, PerspectiveSession, PracticeSession, PracticeStatus, User,
};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<Uuid, User>,
    perspective_sessions: HashMap<Uuid, PerspectiveSession>,
    practice_sessions: HashMap<Uuid, PracticeSession>,
}

impl MemoryStore {
    pub fn find_user_by_external_id(&self, external_id: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.external_id == external_id)
            .cloned()
    }

    pub fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).cloned()
    }

    pub fn insert_user(&mut self, user: User) -> Result<(), AppError> {
        if self.find_user_by_external_id(&user.external_id).is_some() {
            return Err(AppError::Database(format!(
                "duplicate external_id {}",
                user.external_id
            )));
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn set_email_preferences(
        &mut self,
        user_id: Uuid,
        preferences: serde_json::Value,
    ) -> Option<User> {
        let user = self.users.get_mut(&user_id)?;
        user.email_preferences = Some(preferences);
        user.updated_at = Utc::now();
        Some(user.clone())
    }

    pub fn insert_perspective_session(
        &mut self,
        session: PerspectiveSession,
    ) -> Result<(), AppError> {
        if !self.users.contains_key(&session.user_id) {
            return Err(AppError::Database(format!(
                "perspective session references unknown user {}",
                session.user_id
            )));
        }
        self.perspective_sessions.insert(session.id, session);
        Ok(())
    }

    pub fn get_perspective_session_with_cards(&self, id: Uuid) -> Option<PerspectiveSession> {
        let mut session = self.perspective_sessions.get(&id)?.clone();
        session
            .cards
            .sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        Some(session)
    }

    pub fn create_practice_session(
        &mut self,
        new: NewPracticeSession,
    ) -> Result<PracticeSession, AppError> {
        if !self.users.contains_key(&new.user_id) {
            return Err(AppError::Database(format!(
                "practice session references unknown user {}",
                new.user_id
            )));
        }
        if !self
            .perspective_sessions
            .contains_key(&new.perspective_session_id)
        {
            return Err(AppError::Database(format!(
                "practice session references unknown perspective session {}",
                new.perspective_session_id
            )));
        }

        let session = new.into_pending(Utc::now());
        self.practice_sessions.insert(session.id, session.clone());
        Ok(session)
    }

    pub fn activate_practice_session(&mut self, id: Uuid, room_url: &str) -> bool {
        match self.practice_sessions.get_mut(&id) {
            Some(session) => {
                session.status = PracticeStatus::Active;
                session.room_url = Some(room_url.to_string());
                session.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn get_practice_session(&self, id: Uuid) -> Option<PracticeSession> {
        self.practice_sessions.get(&id).cloned()
    }

    pub fn list_practice_sessions_for_user(&self, user_id: Uuid) -> Vec<PracticeSession> {
        let mut sessions: Vec<PracticeSession> = self
            .practice_sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        sessions
    }
}
