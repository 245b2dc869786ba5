// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email preference routes.

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{EmailPreferences, StoredEmailPreferences, User};
use crate::services::preferences;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Preference routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/user/email-preferences",
        get(get_email_preferences).put(update_email_preferences),
    )
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EmailPreferencesResponse {
    pub email: String,
    pub preferences: EmailPreferences,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateEmailPreferencesResponse {
    pub message: String,
    pub email: String,
    /// Only the flags that were stored
    pub preferences: StoredEmailPreferences,
}

async fn resolve_user(state: &AppState, user: &AuthUser) -> Result<User> {
    state
        .db
        .find_user_by_external_id(&user.external_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Get the caller's email and effective preferences.
async fn get_email_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<EmailPreferencesResponse>> {
    let user = resolve_user(&state, &user).await?;
    let preferences = preferences::resolve(user.id, user.email_preferences.as_ref());

    Ok(Json(EmailPreferencesResponse {
        email: user.email,
        preferences,
    }))
}

/// Store the recognized flags from `{preferences: {...}}`.
async fn update_email_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<UpdateEmailPreferencesResponse>> {
    let user = resolve_user(&state, &user).await?;

    let invalid = || AppError::BadRequest("Valid preferences object is required".to_string());
    let Json(body) = body.map_err(|_| invalid())?;
    let no_keys = serde_json::Map::new();
    let update = match body.get("preferences") {
        Some(serde_json::Value::Object(map)) => map,
        // Arrays are objects to the web client; their indices are never
        // recognized keys, so they store an empty set.
        Some(serde_json::Value::Array(_)) => &no_keys,
        _ => return Err(invalid()),
    };

    let filtered = preferences::filter_update(update);
    let blob = serde_json::to_value(filtered).map_err(anyhow::Error::from)?;

    let updated = state
        .db
        .set_email_preferences(user.id, blob)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(
        user_id = %updated.id,
        preferences = ?filtered,
        "Email preferences updated"
    );

    Ok(Json(UpdateEmailPreferencesResponse {
        message: "Email preferences updated successfully".to_string(),
        email: updated.email,
        preferences: filtered,
    }))
}
