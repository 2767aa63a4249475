//! Hit repository
//!
//! Per-news view counting. Each (news, session key) pair is recorded at
//! most once; the unique index makes repeat views no-ops.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Hit repository trait
#[async_trait]
pub trait HitRepository: Send + Sync {
    /// Record a hit for the given session key. Returns true when the hit
    /// was counted, false when this key already hit this news item.
    async fn record(&self, news_id: i64, session_key: &str) -> Result<bool>;

    /// Total distinct hits on a news item
    async fn count_by_news(&self, news_id: i64) -> Result<i64>;
}

/// SQLx-based hit repository implementation
pub struct SqlxHitRepository {
    pool: SqlitePool,
}

impl SqlxHitRepository {
    /// Create a new SQLx hit repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn HitRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl HitRepository for SqlxHitRepository {
    async fn record(&self, news_id: i64, session_key: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO news_hits (news_id, session_key, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(news_id)
        .bind(session_key)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to record hit")?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_news(&self, news_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM news_hits WHERE news_id = ?")
            .bind(news_id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count hits")?;

        Ok(row.get("count"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> (SqlitePool, SqlxHitRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxHitRepository::new(pool.clone());
        (pool, repo)
    }

    async fn create_test_news(pool: &SqlitePool, slug: &str) -> i64 {
        let result = sqlx::query(
            "INSERT INTO news (title, slug, body, category_id, status) VALUES (?, ?, 'b', 1, 'published')",
        )
        .bind(slug)
        .bind(slug)
        .execute(pool)
        .await
        .expect("Failed to create news");
        result.last_insert_rowid()
    }

    #[tokio::test]
    async fn test_record_is_idempotent_per_session() {
        let (pool, repo) = setup().await;
        let news_id = create_test_news(&pool, "item").await;

        assert!(repo.record(news_id, "session-a").await.expect("record"));
        assert!(!repo.record(news_id, "session-a").await.expect("record"));
        assert_eq!(repo.count_by_news(news_id).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_distinct_sessions_count_separately() {
        let (pool, repo) = setup().await;
        let news_id = create_test_news(&pool, "item").await;

        assert!(repo.record(news_id, "session-a").await.expect("record"));
        assert!(repo.record(news_id, "session-b").await.expect("record"));
        assert_eq!(repo.count_by_news(news_id).await.expect("count"), 2);
    }

    #[tokio::test]
    async fn test_counts_are_per_news() {
        let (pool, repo) = setup().await;
        let first = create_test_news(&pool, "first").await;
        let second = create_test_news(&pool, "second").await;

        repo.record(first, "session-a").await.expect("record");
        repo.record(second, "session-a").await.expect("record");

        assert_eq!(repo.count_by_news(first).await.expect("count"), 1);
        assert_eq!(repo.count_by_news(second).await.expect("count"), 1);
    }
}
