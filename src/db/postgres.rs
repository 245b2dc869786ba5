// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgreSQL queries backing [`super::Database`].

use crate::error::AppError;
use crate::models::{
    Card, NewPracticeSession, PerspectiveSession, PracticeSession, PracticeStatus, User,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, external_id, email, email_preferences, created_at, updated_at";
const PRACTICE_COLUMNS: &str = "id, user_id, perspective_session_id, persona, persona_traits, \
     goal, context, room_url, status, created_at, updated_at";

// ─── Users ───────────────────────────────────────────────────

pub async fn find_user_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE external_id = $1");
    Ok(sqlx::query_as::<_, User>(&sql)
        .bind(external_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    Ok(sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn insert_user(pool: &PgPool, user: &User) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, external_id, email, email_preferences, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(user.id)
    .bind(&user.external_id)
    .bind(&user.email)
    .bind(&user.email_preferences)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_email_preferences(
    pool: &PgPool,
    user_id: Uuid,
    preferences: &serde_json::Value,
) -> Result<Option<User>, AppError> {
    let sql = format!(
        "UPDATE users SET email_preferences = $1, updated_at = $2 WHERE id = $3 \
         RETURNING {USER_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, User>(&sql)
        .bind(preferences)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
}

// ─── Perspective Sessions ────────────────────────────────────

pub async fn insert_perspective_session(
    pool: &PgPool,
    session: &PerspectiveSession,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO perspective_sessions (id, user_id, created_at) VALUES ($1, $2, $3)")
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.created_at)
        .execute(&mut *tx)
        .await?;

    for card in &session.cards {
        sqlx::query(
            r#"
            INSERT INTO cards (id, perspective_session_id, title, content, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(card.id)
        .bind(card.perspective_session_id)
        .bind(&card.title)
        .bind(&card.content)
        .bind(card.position)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn get_perspective_session_with_cards(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PerspectiveSession>, AppError> {
    let session = sqlx::query_as::<_, PerspectiveSession>(
        "SELECT id, user_id, created_at FROM perspective_sessions WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(mut session) = session else {
        return Ok(None);
    };

    session.cards = sqlx::query_as::<_, Card>(
        r#"
        SELECT id, perspective_session_id, title, content, position
        FROM cards
        WHERE perspective_session_id = $1
        ORDER BY position ASC, id ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(session))
}

// ─── Practice Sessions ───────────────────────────────────────

pub async fn create_practice_session(
    pool: &PgPool,
    new: NewPracticeSession,
) -> Result<PracticeSession, AppError> {
    let session = new.into_pending(Utc::now());
    let sql = format!(
        "INSERT INTO practice_sessions ({PRACTICE_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING {PRACTICE_COLUMNS}"
    );

    Ok(sqlx::query_as::<_, PracticeSession>(&sql)
        .bind(session.id)
        .bind(session.user_id)
        .bind(session.perspective_session_id)
        .bind(&session.persona)
        .bind(&session.persona_traits)
        .bind(&session.goal)
        .bind(&session.context)
        .bind(&session.room_url)
        .bind(session.status)
        .bind(session.created_at)
        .bind(session.updated_at)
        .fetch_one(pool)
        .await?)
}

pub async fn activate_practice_session(
    pool: &PgPool,
    id: Uuid,
    room_url: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE practice_sessions SET status = $1, room_url = $2, updated_at = $3 WHERE id = $4",
    )
    .bind(PracticeStatus::Active)
    .bind(room_url)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_practice_session(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PracticeSession>, AppError> {
    let sql = format!("SELECT {PRACTICE_COLUMNS} FROM practice_sessions WHERE id = $1");
    Ok(sqlx::query_as::<_, PracticeSession>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn list_practice_sessions_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PracticeSession>, AppError> {
    let sql = format!(
        "SELECT {PRACTICE_COLUMNS} FROM practice_sessions WHERE user_id = $1 \
         ORDER BY created_at ASC"
    );
    Ok(sqlx::query_as::<_, PracticeSession>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?)
}
