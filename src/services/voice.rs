// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Voice backend client.
//!
//! The voice backend hosts the live audio room and the agent that plays the
//! persona. We only call its `connect` endpoint, once per practice session.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// HTTP client for the voice backend.
#[derive(Clone)]
pub struct VoiceBackendClient {
    http: reqwest::Client,
    base_url: String,
}

/// Body of `POST /connect`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectRequest<'a> {
    session_id: Uuid,
    system_prompt: &'a str,
}

/// A provisioned room and the token the client uses to join it.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConnection {
    pub room_url: String,
    pub token: String,
}

impl VoiceBackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend to create a room for `session_id` driven by `system_prompt`.
    ///
    /// Any non-2xx status is an error. No retry.
    pub async fn connect(
        &self,
        session_id: Uuid,
        system_prompt: &str,
    ) -> Result<RoomConnection, AppError> {
        let url = format!("{}/connect", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&ConnectRequest {
                session_id,
                system_prompt,
            })
            .send()
            .await
            .map_err(|e| AppError::VoiceBackend(format!("connect request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::VoiceBackend(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::VoiceBackend(format!("JSON parse error: {}", e)))
    }
}
