// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Practice room routes.

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::services::{create_practice_session, CreateSessionRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Practice routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/practice-room/create-session", post(create_session))
}

/// Response for a provisioned practice session.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateSessionResponse {
    pub practice_session_id: Uuid,
    pub room_url: String,
    pub token: String,
}

/// Create a practice session and provision its voice room.
async fn create_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: std::result::Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<CreateSessionResponse>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    tracing::debug!(
        external_id = %user.external_id,
        perspective_session_id = ?request.perspective_session_id,
        "Creating practice session"
    );

    let provisioned =
        create_practice_session(&state.db, &state.voice, &user.external_id, request).await?;

    Ok(Json(CreateSessionResponse {
        practice_session_id: provisioned.practice_session_id,
        room_url: provisioned.room_url,
        token: provisioned.token,
    }))
}
