// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide PostgreSQL pool.
//!
//! The pool is created at most once per process with [`init_global`] and
//! reused by every request afterwards. [`close_global`] is the teardown hook
//! and must be called once the server has stopped accepting requests.

use crate::config::RuntimeMode;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tokio::sync::OnceCell;

/// Only PostgreSQL connection strings are accepted.
pub const REQUIRED_SCHEME: &str = "postgresql:";

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Pool sizing, fixed per runtime mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    pub fn for_mode(mode: RuntimeMode) -> Self {
        match mode {
            RuntimeMode::Production => Self {
                max_connections: 20,
                acquire_timeout: Duration::from_secs(30),
            },
            RuntimeMode::Development => Self {
                max_connections: 15,
                acquire_timeout: Duration::from_secs(20),
            },
        }
    }

    fn pool_options(self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Errors raised while creating the pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Only PostgreSQL databases are supported. DATABASE_URL must start with \"postgresql:\"")]
    UnsupportedScheme,

    #[error("Failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Reject connection strings that do not use the PostgreSQL scheme.
pub fn validate_database_url(url: &str) -> Result<(), PoolError> {
    if url.starts_with(REQUIRED_SCHEME) {
        Ok(())
    } else {
        Err(PoolError::UnsupportedScheme)
    }
}

/// Get the process-wide pool, connecting and migrating on first use.
///
/// Concurrent first callers wait for a single initialization. A failed
/// initialization leaves the cell empty so a later call can retry.
pub async fn init_global(url: &str, mode: RuntimeMode) -> Result<&'static PgPool, PoolError> {
    POOL.get_or_try_init(|| connect(url, mode)).await
}

/// The pool, if [`init_global`] has succeeded.
pub fn global() -> Option<&'static PgPool> {
    POOL.get()
}

/// Close every connection in the process-wide pool.
pub async fn close_global() {
    if let Some(pool) = POOL.get() {
        tracing::info!("Closing database pool");
        pool.close().await;
    }
}

/// Open a migrated pool that is not shared through the global cell.
///
/// Used by [`init_global`] and by tests that need a pool tied to their own
/// runtime.
pub async fn connect(url: &str, mode: RuntimeMode) -> Result<PgPool, PoolError> {
    validate_database_url(url)?;

    let settings = PoolSettings::for_mode(mode);
    let pool = settings.pool_options().connect(url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(
        max_connections = settings.max_connections,
        acquire_timeout_secs = settings.acquire_timeout.as_secs(),
        production = mode.is_production(),
        "Connected to PostgreSQL"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_postgresql_scheme() {
        assert!(validate_database_url("postgresql://u:p@localhost/db").is_ok());
        assert!(matches!(
            validate_database_url("mysql://u:p@localhost/db"),
            Err(PoolError::UnsupportedScheme)
        ));
        assert!(matches!(
            validate_database_url("postgres://u:p@localhost/db"),
            Err(PoolError::UnsupportedScheme)
        ));
    }

    #[test]
    fn test_pool_settings_by_mode() {
        let prod = PoolSettings::for_mode(RuntimeMode::Production);
        assert_eq!(prod.max_connections, 20);
        assert_eq!(prod.acquire_timeout, Duration::from_secs(30));

        let dev = PoolSettings::for_mode(RuntimeMode::Development);
        assert_eq!(dev.max_connections, 15);
        assert_eq!(dev.acquire_timeout, Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_bad_scheme_leaves_global_uninitialized() {
        let err = init_global("sqlite://practice.db", RuntimeMode::Development)
            .await
            .unwrap_err();
        assert!(matches!(err, PoolError::UnsupportedScheme));
        assert!(global().is_none());
    }
}
