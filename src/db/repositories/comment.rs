//! Comment repository
//!
//! Database operations for comments, including the bulk activation
//! toggles used by the admin layer.

use crate::models::{Comment, CommentWithAuthor, CreateCommentInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment (active by default)
    async fn create(&self, input: &CreateCommentInput) -> Result<Comment>;

    /// Get comment by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// List active comments on a news item, oldest first, with author names
    async fn list_active_by_news(&self, news_id: i64) -> Result<Vec<CommentWithAuthor>>;

    /// Count active comments on a news item
    async fn count_active_by_news(&self, news_id: i64) -> Result<i64>;

    /// List comments, optionally filtered by the active flag, newest first
    async fn list(&self, active: Option<bool>, offset: i64, limit: i64) -> Result<Vec<Comment>>;

    /// Count comments, optionally filtered by the active flag
    async fn count(&self, active: Option<bool>) -> Result<i64>;

    /// Set the active flag on a batch of comments. Returns rows affected.
    async fn set_active(&self, ids: &[i64], active: bool) -> Result<u64>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    /// Create a new SQLx comment repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, input: &CreateCommentInput) -> Result<Comment> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO comments (news_id, user_id, body, active, created_time)
            VALUES (?, ?, ?, 1, ?)
            "#,
        )
        .bind(input.news_id)
        .bind(input.user_id)
        .bind(&input.body)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            news_id: input.news_id,
            user_id: input.user_id,
            body: input.body.clone(),
            active: true,
            created_time: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, news_id, user_id, body, active, created_time FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_comment(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_active_by_news(&self, news_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.news_id, c.user_id, c.body, c.active, c.created_time, u.username
            FROM comments c
            INNER JOIN users u ON c.user_id = u.id
            WHERE c.news_id = ? AND c.active = 1
            ORDER BY c.created_time ASC, c.id ASC
            "#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list active comments")?;

        let mut comments = Vec::new();
        for row in &rows {
            comments.push(CommentWithAuthor {
                comment: row_to_comment(row)?,
                username: row.get("username"),
            });
        }

        Ok(comments)
    }

    async fn count_active_by_news(&self, news_id: i64) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM comments WHERE news_id = ? AND active = 1",
        )
        .bind(news_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count active comments")?;

        Ok(row.get("count"))
    }

    async fn list(&self, active: Option<bool>, offset: i64, limit: i64) -> Result<Vec<Comment>> {
        let rows = match active {
            Some(active) => {
                sqlx::query(
                    r#"
                    SELECT id, news_id, user_id, body, active, created_time
                    FROM comments
                    WHERE active = ?
                    ORDER BY created_time DESC, id DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(active)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, news_id, user_id, body, active, created_time
                    FROM comments
                    ORDER BY created_time DESC, id DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("Failed to list comments")?;

        rows.iter().map(row_to_comment).collect()
    }

    async fn count(&self, active: Option<bool>) -> Result<i64> {
        let row = match active {
            Some(active) => {
                sqlx::query("SELECT COUNT(*) as count FROM comments WHERE active = ?")
                    .bind(active)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) as count FROM comments")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .context("Failed to count comments")?;

        Ok(row.get("count"))
    }

    async fn set_active(&self, ids: &[i64], active: bool) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!(
            "UPDATE comments SET active = ? WHERE id IN ({})",
            placeholders
        );

        let mut q = sqlx::query(&query).bind(active);
        for id in ids {
            q = q.bind(id);
        }

        let result = q
            .execute(&self.pool)
            .await
            .context("Failed to update comment active flags")?;

        Ok(result.rows_affected())
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.get("id"),
        news_id: row.get("news_id"),
        user_id: row.get("user_id"),
        body: row.get("body"),
        active: row.get("active"),
        created_time: row.get("created_time"),
    })
}
