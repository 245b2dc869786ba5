// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Practice session creation.
//!
//! One linear pass: validate the request, resolve the caller, load the
//! perspective session, record a `pending` practice session, compose the
//! prompt, provision a room, then mark the session `active`.
//!
//! The create and the final update are separate writes. If provisioning
//! fails the session stays `pending` with no room URL.

use crate::db::{parse_id, Database};
use crate::error::AppError;
use crate::models::NewPracticeSession;
use crate::services::prompt::{compose_system_prompt, PromptInput};
use crate::services::voice::VoiceBackendClient;
use serde::Deserialize;
use uuid::Uuid;

/// Body of `POST /api/practice-room/create-session`.
///
/// Every field is optional at the type level so that missing fields are
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub perspective_session_id: Option<String>,
    pub persona: Option<String>,
    pub persona_traits: Option<Vec<String>>,
    pub goal: Option<String>,
    pub conversation_context: Option<String>,
}

/// A request with all required fields present.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub perspective_session_id: String,
    pub persona: String,
    pub persona_traits: Vec<String>,
    pub goal: String,
    pub conversation_context: String,
}

impl CreateSessionRequest {
    /// Check presence of required fields. Empty strings count as missing.
    pub fn validate(self) -> Result<ValidatedRequest, AppError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }

        let missing = || AppError::BadRequest("Missing required fields".to_string());

        Ok(ValidatedRequest {
            perspective_session_id: present(self.perspective_session_id).ok_or_else(missing)?,
            persona: present(self.persona).ok_or_else(missing)?,
            goal: present(self.goal).ok_or_else(missing)?,
            persona_traits: self
                .persona_traits
                .filter(|traits| !traits.is_empty())
                .ok_or_else(missing)?,
            conversation_context: self.conversation_context.unwrap_or_default(),
        })
    }
}

/// Result returned to the client.
#[derive(Debug, Clone)]
pub struct ProvisionedSession {
    pub practice_session_id: Uuid,
    pub room_url: String,
    pub token: String,
}

/// Create a practice session for the caller identified by `external_id`.
pub async fn create_practice_session(
    db: &Database,
    voice: &VoiceBackendClient,
    external_id: &str,
    request: CreateSessionRequest,
) -> Result<ProvisionedSession, AppError> {
    let request = request.validate()?;

    let user = db
        .find_user_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let perspective_not_found = || AppError::NotFound("Perspective session not found".to_string());
    let perspective_id =
        parse_id(&request.perspective_session_id).ok_or_else(perspective_not_found)?;
    let perspective = db
        .get_perspective_session_with_cards(perspective_id)
        .await?
        .ok_or_else(perspective_not_found)?;

    let session = db
        .create_practice_session(NewPracticeSession {
            user_id: user.id,
            perspective_session_id: perspective.id,
            persona: request.persona,
            persona_traits: request.persona_traits,
            goal: request.goal,
            context: request.conversation_context,
        })
        .await?;

    tracing::info!(
        practice_session_id = %session.id,
        user_id = %user.id,
        perspective_session_id = %perspective.id,
        cards = perspective.cards.len(),
        "Practice session recorded"
    );

    let system_prompt = compose_system_prompt(&PromptInput {
        persona: &session.persona,
        persona_traits: &session.persona_traits,
        goal: &session.goal,
        context: &session.context,
        cards: &perspective.cards,
    });

    let room = voice.connect(session.id, &system_prompt).await.inspect_err(|e| {
        tracing::warn!(
            practice_session_id = %session.id,
            error = %e,
            "Room provisioning failed; session left pending"
        );
    })?;

    db.activate_practice_session(session.id, &room.room_url)
        .await?;

    tracing::info!(
        practice_session_id = %session.id,
        room_url = %room.room_url,
        "Practice session active"
    );

    Ok(ProvisionedSession {
        practice_session_id: session.id,
        room_url: room.room_url,
        token: room.token,
    })
}
