//! News repository
//!
//! Database operations for news items.
//!
//! This module provides:
//! - `NewsRepository` trait defining the interface for news data access
//! - `SqlxNewsRepository` implementing the trait over SQLite
//!
//! Public visibility is expressed as explicit repository methods
//! (`list_published`, `find_published_by_slug`) rather than an implicit
//! default filter, so call sites always state which view they want.

use crate::models::{News, NewsStatus, UpdateNewsInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a new news item
    async fn create(&self, news: &News) -> Result<News>;

    /// Get news by ID, regardless of status
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// Get news by slug, regardless of status
    async fn get_by_slug(&self, slug: &str) -> Result<Option<News>>;

    /// Get published news by slug. Drafts resolve to `None`,
    /// indistinguishable from a missing slug.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<News>>;

    /// List news of any status, newest publish time first
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<News>>;

    /// Count all news
    async fn count(&self) -> Result<i64>;

    /// List news with the given status, newest publish time first
    async fn list_by_status(&self, status: NewsStatus, offset: i64, limit: i64)
        -> Result<Vec<News>>;

    /// Count news with the given status
    async fn count_by_status(&self, status: NewsStatus) -> Result<i64>;

    /// List published news, newest publish time first
    async fn list_published(&self, offset: i64, limit: i64) -> Result<Vec<News>>;

    /// Count published news
    async fn count_published(&self) -> Result<i64>;

    /// List published news in a category, newest publish time first
    async fn list_published_by_category(
        &self,
        category_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<News>>;

    /// Update a news item. The slug is never touched.
    async fn update(&self, id: i64, input: &UpdateNewsInput) -> Result<News>;

    /// Delete a news item
    async fn delete(&self, id: i64) -> Result<()>;

    /// Check if a slug is already taken
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;

    /// Case-insensitive substring search over title and body
    async fn search(
        &self,
        keyword: &str,
        offset: i64,
        limit: i64,
        published_only: bool,
    ) -> Result<Vec<News>>;

    /// Count search matches
    async fn count_search(&self, keyword: &str, published_only: bool) -> Result<i64>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: SqlitePool,
}

impl SqlxNewsRepository {
    /// Create a new SQLx news repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

const NEWS_COLUMNS: &str =
    "id, title, slug, body, image, category_id, status, publish_time, created_time, updated_time";

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, news: &News) -> Result<News> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO news (title, slug, body, image, category_id, status, publish_time, created_time, updated_time)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&news.title)
        .bind(&news.slug)
        .bind(&news.body)
        .bind(&news.image)
        .bind(news.category_id)
        .bind(news.status.as_str())
        .bind(news.publish_time)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create news")?;

        let id = result.last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("News not found after create"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM news WHERE id = ?",
            NEWS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get news by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_news(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<News>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM news WHERE slug = ?",
            NEWS_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get news by slug")?;

        match row {
            Some(row) => Ok(Some(row_to_news(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<News>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM news WHERE slug = ? AND status = 'published'",
            NEWS_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get published news by slug")?;

        match row {
            Some(row) => Ok(Some(row_to_news(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<News>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM news ORDER BY publish_time DESC LIMIT ? OFFSET ?",
            NEWS_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list news")?;

        rows.iter().map(row_to_news).collect()
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM news")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count news")?;

        Ok(row.get("count"))
    }

    async fn list_by_status(
        &self,
        status: NewsStatus,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<News>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM news WHERE status = ? ORDER BY publish_time DESC LIMIT ? OFFSET ?",
            NEWS_COLUMNS
        ))
        .bind(status.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list news by status")?;

        rows.iter().map(row_to_news).collect()
    }

    async fn count_by_status(&self, status: NewsStatus) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM news WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .context("Failed to count news by status")?;

        Ok(row.get("count"))
    }

    async fn list_published(&self, offset: i64, limit: i64) -> Result<Vec<News>> {
        self.list_by_status(NewsStatus::Published, offset, limit)
            .await
    }

    async fn count_published(&self) -> Result<i64> {
        self.count_by_status(NewsStatus::Published).await
    }

    async fn list_published_by_category(
        &self,
        category_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<News>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM news
            WHERE category_id = ? AND status = 'published'
            ORDER BY publish_time DESC
            LIMIT ? OFFSET ?
            "#,
            NEWS_COLUMNS
        ))
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list published news by category")?;

        rows.iter().map(row_to_news).collect()
    }

    async fn update(&self, id: i64, input: &UpdateNewsInput) -> Result<News> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("News not found"))?;

        let now = Utc::now();
        let new_title = input.title.as_ref().unwrap_or(&existing.title);
        let new_body = input.body.as_ref().unwrap_or(&existing.body);
        let new_image = input.image.as_ref().unwrap_or(&existing.image);
        let new_category_id = input.category_id.unwrap_or(existing.category_id);
        let new_status = input.status.unwrap_or(existing.status);

        sqlx::query(
            r#"
            UPDATE news
            SET title = ?, body = ?, image = ?, category_id = ?, status = ?, updated_time = ?
            WHERE id = ?
            "#,
        )
        .bind(new_title)
        .bind(new_body)
        .bind(new_image)
        .bind(new_category_id)
        .bind(new_status.as_str())
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update news")?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("News not found after update"))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete news")?;

        Ok(())
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM news WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check news slug existence")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    async fn search(
        &self,
        keyword: &str,
        offset: i64,
        limit: i64,
        published_only: bool,
    ) -> Result<Vec<News>> {
        let search_pattern = format!("%{}%", keyword);

        let query = if published_only {
            format!(
                r#"
                SELECT {}
                FROM news
                WHERE status = 'published' AND (title LIKE ? OR body LIKE ?)
                ORDER BY publish_time DESC
                LIMIT ? OFFSET ?
                "#,
                NEWS_COLUMNS
            )
        } else {
            format!(
                r#"
                SELECT {}
                FROM news
                WHERE title LIKE ? OR body LIKE ?
                ORDER BY publish_time DESC
                LIMIT ? OFFSET ?
                "#,
                NEWS_COLUMNS
            )
        };

        let rows = sqlx::query(&query)
            .bind(&search_pattern)
            .bind(&search_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .context("Failed to search news")?;

        rows.iter().map(row_to_news).collect()
    }

    async fn count_search(&self, keyword: &str, published_only: bool) -> Result<i64> {
        let search_pattern = format!("%{}%", keyword);

        let query = if published_only {
            "SELECT COUNT(*) as count FROM news WHERE status = 'published' AND (title LIKE ? OR body LIKE ?)"
        } else {
            "SELECT COUNT(*) as count FROM news WHERE title LIKE ? OR body LIKE ?"
        };

        let row = sqlx::query(query)
            .bind(&search_pattern)
            .bind(&search_pattern)
            .fetch_one(&self.pool)
            .await
            .context("Failed to count search results")?;

        Ok(row.get("count"))
    }
}

fn row_to_news(row: &sqlx::sqlite::SqliteRow) -> Result<News> {
    let status_str: String = row.get("status");
    let status = NewsStatus::from_str(&status_str)
        .ok_or_else(|| anyhow::anyhow!("Invalid news status: {}", status_str))?;

    Ok(News {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        body: row.get("body"),
        image: row.get("image"),
        category_id: row.get("category_id"),
        status,
        publish_time: row.get("publish_time"),
        created_time: row.get("created_time"),
        updated_time: row.get("updated_time"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> (SqlitePool, SqlxNewsRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxNewsRepository::new(pool.clone());
        (pool, repo)
    }

    fn test_news(title: &str, slug: &str, status: NewsStatus) -> News {
        let now = Utc::now();
        News {
            id: 0,
            title: title.to_string(),
            slug: slug.to_string(),
            body: format!("Body for {}", title),
            image: String::new(),
            category_id: 1,
            status,
            publish_time: now,
            created_time: now,
            updated_time: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_slug() {
        let (_pool, repo) = setup_test_repo().await;

        let created = repo
            .create(&test_news("Hello", "hello", NewsStatus::Published))
            .await
            .expect("Failed to create news");

        assert!(created.id > 0);

        let found = repo
            .get_by_slug("hello")
            .await
            .expect("Failed to get news")
            .expect("News not found");
        assert_eq!(found.title, "Hello");
        assert_eq!(found.status, NewsStatus::Published);
    }

    #[tokio::test]
    async fn test_unique_slug_constraint() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&test_news("First", "dup", NewsStatus::Draft))
            .await
            .expect("Failed to create first");
        let result = repo.create(&test_news("Second", "dup", NewsStatus::Draft)).await;

        assert!(result.is_err(), "Should fail due to duplicate slug");
    }

    #[tokio::test]
    async fn test_find_published_by_slug_hides_drafts() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&test_news("Draft", "draft-item", NewsStatus::Draft))
            .await
            .expect("Failed to create draft");
        repo.create(&test_news("Live", "live-item", NewsStatus::Published))
            .await
            .expect("Failed to create published");

        let draft = repo
            .find_published_by_slug("draft-item")
            .await
            .expect("Query failed");
        assert!(draft.is_none());

        let missing = repo
            .find_published_by_slug("no-such-item")
            .await
            .expect("Query failed");
        assert!(missing.is_none());

        let live = repo
            .find_published_by_slug("live-item")
            .await
            .expect("Query failed");
        assert!(live.is_some());
    }

    #[tokio::test]
    async fn test_list_published_excludes_drafts_and_orders_by_publish_time() {
        let (_pool, repo) = setup_test_repo().await;

        let mut older = test_news("Older", "older", NewsStatus::Published);
        older.publish_time = Utc::now() - chrono::Duration::hours(2);
        repo.create(&older).await.expect("Failed to create older");

        repo.create(&test_news("Newer", "newer", NewsStatus::Published))
            .await
            .expect("Failed to create newer");
        repo.create(&test_news("Hidden", "hidden", NewsStatus::Draft))
            .await
            .expect("Failed to create draft");

        let published = repo.list_published(0, 10).await.expect("Failed to list");

        assert_eq!(published.len(), 2);
        assert_eq!(published[0].slug, "newer");
        assert_eq!(published[1].slug, "older");
        assert_eq!(repo.count_published().await.expect("count"), 2);
        assert_eq!(repo.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn test_list_published_by_category() {
        let (_pool, repo) = setup_test_repo().await;

        let mut sport = test_news("Sport news", "sport-news", NewsStatus::Published);
        sport.category_id = 3; // seeded 'sport'
        repo.create(&sport).await.expect("Failed to create");

        let mut local = test_news("Local news", "local-news", NewsStatus::Published);
        local.category_id = 1; // seeded 'mahalliy'
        repo.create(&local).await.expect("Failed to create");

        let sport_list = repo
            .list_published_by_category(3, 0, 10)
            .await
            .expect("Failed to list");
        assert_eq!(sport_list.len(), 1);
        assert_eq!(sport_list[0].slug, "sport-news");
    }

    #[tokio::test]
    async fn test_update_does_not_touch_slug() {
        let (_pool, repo) = setup_test_repo().await;

        let created = repo
            .create(&test_news("Original", "stable-slug", NewsStatus::Draft))
            .await
            .expect("Failed to create");

        let input = UpdateNewsInput {
            title: Some("Edited".to_string()),
            status: Some(NewsStatus::Published),
            ..Default::default()
        };
        let updated = repo.update(created.id, &input).await.expect("Failed to update");

        assert_eq!(updated.slug, "stable-slug");
        assert_eq!(updated.title, "Edited");
        assert_eq!(updated.status, NewsStatus::Published);
        assert_eq!(updated.body, created.body);
    }

    #[tokio::test]
    async fn test_update_missing_news_fails() {
        let (_pool, repo) = setup_test_repo().await;

        let result = repo.update(99999, &UpdateNewsInput::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_pool, repo) = setup_test_repo().await;

        let created = repo
            .create(&test_news("Doomed", "doomed", NewsStatus::Published))
            .await
            .expect("Failed to create");

        repo.delete(created.id).await.expect("Failed to delete");

        let found = repo.get_by_id(created.id).await.expect("Query failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_search_title_and_body_case_insensitive() {
        let (_pool, repo) = setup_test_repo().await;

        let mut by_title = test_news("Budget Review", "budget-review", NewsStatus::Published);
        by_title.body = "nothing relevant".to_string();
        repo.create(&by_title).await.expect("create");

        let mut by_body = test_news("Other title", "other-title", NewsStatus::Published);
        by_body.body = "the BUDGET shrank".to_string();
        repo.create(&by_body).await.expect("create");

        repo.create(&test_news("Unrelated", "unrelated", NewsStatus::Published))
            .await
            .expect("create");

        let results = repo.search("budget", 0, 10, true).await.expect("search");
        assert_eq!(results.len(), 2);
        assert_eq!(repo.count_search("budget", true).await.expect("count"), 2);
    }

    #[tokio::test]
    async fn test_search_published_only_flag() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&test_news("Budget draft", "budget-draft", NewsStatus::Draft))
            .await
            .expect("create");
        repo.create(&test_news("Budget live", "budget-live", NewsStatus::Published))
            .await
            .expect("create");

        let public = repo.search("budget", 0, 10, true).await.expect("search");
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].slug, "budget-live");

        let all = repo.search("budget", 0, 10, false).await.expect("search");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_exists_by_slug() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&test_news("Exists", "exists", NewsStatus::Draft))
            .await
            .expect("create");

        assert!(repo.exists_by_slug("exists").await.expect("check"));
        assert!(!repo.exists_by_slug("missing").await.expect("check"));
    }

    #[tokio::test]
    async fn test_list_by_status_filters_drafts() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&test_news("A", "a", NewsStatus::Draft))
            .await
            .expect("create");
        repo.create(&test_news("B", "b", NewsStatus::Published))
            .await
            .expect("create");

        let drafts = repo
            .list_by_status(NewsStatus::Draft, 0, 10)
            .await
            .expect("list");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].slug, "a");
    }
}
