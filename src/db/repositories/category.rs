//! Category repository
//!
//! Database operations for the flat category roster.

use crate::models::{Category, UpdateCategoryInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, name: &str) -> Result<Category>;

    /// Get category by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>>;

    /// Get category by name
    async fn get_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// List all categories
    async fn list(&self) -> Result<Vec<Category>>;

    /// Update a category
    async fn update(&self, id: i64, input: &UpdateCategoryInput) -> Result<Category>;

    /// Check if a category name already exists
    async fn exists_by_name(&self, name: &str) -> Result<bool>;
}

/// SQLx-based category repository implementation
pub struct SqlxCategoryRepository {
    pool: SqlitePool,
}

impl SqlxCategoryRepository {
    /// Create a new SQLx category repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn CategoryRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn create(&self, name: &str) -> Result<Category> {
        let now = Utc::now();

        let result = sqlx::query("INSERT INTO categories (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(now)
            .execute(&self.pool)
            .await
            .context("Failed to create category")?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, created_at FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get category by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, created_at FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get category by name")?;

        match row {
            Some(row) => Ok(Some(row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list categories")?;

        rows.iter().map(row_to_category).collect()
    }

    async fn update(&self, id: i64, input: &UpdateCategoryInput) -> Result<Category> {
        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Category not found"))?;

        let new_name = input.name.as_ref().unwrap_or(&existing.name);

        sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(new_name)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update category")?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Category not found after update"))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM categories WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check category name existence")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }
}

fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
    Ok(Category {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxCategoryRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxCategoryRepository::new(pool)
    }

    #[tokio::test]
    async fn test_seeded_categories_present() {
        let repo = setup_test_repo().await;

        let categories = repo.list().await.expect("Failed to list");
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["mahalliy", "Xorij", "sport", "Texnologiya"]);
    }

    #[tokio::test]
    async fn test_create_and_get_by_name() {
        let repo = setup_test_repo().await;

        let created = repo.create("Iqtisod").await.expect("Failed to create");
        assert!(created.id > 4);

        let found = repo
            .get_by_name("Iqtisod")
            .await
            .expect("Failed to get")
            .expect("Category not found");
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_get_by_name_not_found() {
        let repo = setup_test_repo().await;

        let found = repo.get_by_name("nonexistent").await.expect("Query failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_unique_name_constraint() {
        let repo = setup_test_repo().await;

        let result = repo.create("sport").await;
        assert!(result.is_err(), "Should fail due to duplicate name");
    }

    #[tokio::test]
    async fn test_update_category() {
        let repo = setup_test_repo().await;

        let created = repo.create("Madaniyat").await.expect("Failed to create");
        let input = UpdateCategoryInput {
            name: Some("Madaniyat va San'at".to_string()),
        };

        let updated = repo.update(created.id, &input).await.expect("Failed to update");
        assert_eq!(updated.name, "Madaniyat va San'at");
    }

    #[tokio::test]
    async fn test_exists_by_name() {
        let repo = setup_test_repo().await;

        assert!(repo.exists_by_name("mahalliy").await.expect("check"));
        assert!(!repo.exists_by_name("missing").await.expect("check"));
    }
}
