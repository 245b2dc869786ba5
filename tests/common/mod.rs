// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use practice_room::config::Config;
use practice_room::db::Database;
use practice_room::routes::create_router;
use practice_room::services::VoiceBackendClient;
use practice_room::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// PostgreSQL URL for store-level tests, if one is configured.
#[allow(dead_code)]
pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| url.starts_with(practice_room::db::pool::REQUIRED_SCHEME))
}

/// Skip test with message if no PostgreSQL database is configured.
#[macro_export]
macro_rules! require_database {
    () => {
        match crate::common::database_url() {
            Some(url) => url,
            None => {
                eprintln!("⚠️  Skipping: DATABASE_URL not set to a postgresql: URL");
                return;
            }
        }
    };
}

/// Create a test app backed by the in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(voice_backend_url: &str) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_db(voice_backend_url, Database::in_memory())
}

/// Create a test app over an existing database handle.
#[allow(dead_code)]
pub fn create_test_app_with_db(
    voice_backend_url: &str,
    db: Database,
) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        voice_backend_url: voice_backend_url.to_string(),
        ..Config::test_default()
    };

    let state = Arc::new(AppState {
        voice: VoiceBackendClient::new(config.voice_backend_url.clone()),
        config,
        db,
    });

    (create_router(state.clone()), state)
}

/// Create a session token the way the identity provider would.
#[allow(dead_code)]
pub fn create_test_jwt(external_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: external_id.to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Build a JSON request with a bearer token.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
