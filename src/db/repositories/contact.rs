//! Contact repository
//!
//! Append-only storage for contact form submissions.

use crate::models::{Contact, CreateContactInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Contact repository trait
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a contact message
    async fn create(&self, input: &CreateContactInput) -> Result<Contact>;

    /// List contact messages, newest first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Contact>>;

    /// Count contact messages
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based contact repository implementation
pub struct SqlxContactRepository {
    pool: SqlitePool,
}

impl SqlxContactRepository {
    /// Create a new SQLx contact repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn ContactRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepository {
    async fn create(&self, input: &CreateContactInput) -> Result<Contact> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO contacts (name, email, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create contact message")?;

        Ok(Contact {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            email: input.email.clone(),
            message: input.message.clone(),
            created_at: now,
        })
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Contact>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message, created_at
            FROM contacts
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list contact messages")?;

        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(Contact {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                message: row.get("message"),
                created_at: row.get("created_at"),
            });
        }

        Ok(contacts)
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM contacts")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count contact messages")?;

        Ok(row.get("count"))
    }
}
