//! Session repository
//!
//! Database operations for authentication sessions.

use crate::models::Session;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    async fn create(&self, id: &str, user_id: i64, expires_at: DateTime<Utc>) -> Result<Session>;

    /// Get session by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Delete a session
    async fn delete(&self, id: &str) -> Result<()>;

    /// Delete all expired sessions. Returns rows affected.
    async fn delete_expired(&self) -> Result<u64>;
}

/// SQLx-based session repository implementation
pub struct SqlxSessionRepository {
    pool: SqlitePool,
}

impl SqlxSessionRepository {
    /// Create a new SQLx session repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create(&self, id: &str, user_id: i64, expires_at: DateTime<Utc>) -> Result<Session> {
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create session")?;

        Ok(Session {
            id: id.to_string(),
            user_id,
            expires_at,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, (String, i64, DateTime<Utc>, DateTime<Utc>)>(
            "SELECT id, user_id, expires_at, created_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get session")?;

        Ok(session.map(|(id, user_id, expires_at, created_at)| Session {
            id,
            user_id,
            expires_at,
            created_at,
        }))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;

        Ok(result.rows_affected())
    }
}
