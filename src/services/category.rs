//! Category service
//!
//! Category names double as the public filter labels, so they must stay
//! unique and non-empty.

use crate::db::repositories::CategoryRepository;
use crate::models::{Category, UpdateCategoryInput};
use anyhow::Context;
use std::sync::Arc;

/// Error types for category service operations
#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    /// Category not found
    #[error("Category not found: {0}")]
    NotFound(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Duplicate name
    #[error("Category name already exists: {0}")]
    DuplicateName(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Category service
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    /// Create a new category service
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Create a category
    pub async fn create(&self, name: &str) -> Result<Category, CategoryServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryServiceError::ValidationError(
                "Category name cannot be empty".to_string(),
            ));
        }

        if self
            .repo
            .exists_by_name(name)
            .await
            .context("Failed to check category name")?
        {
            return Err(CategoryServiceError::DuplicateName(name.to_string()));
        }

        let category = self
            .repo
            .create(name)
            .await
            .context("Failed to create category")?;

        Ok(category)
    }

    /// Rename a category
    pub async fn update(
        &self,
        id: i64,
        input: UpdateCategoryInput,
    ) -> Result<Category, CategoryServiceError> {
        let existing = self
            .repo
            .get_by_id(id)
            .await
            .context("Failed to get category")?
            .ok_or_else(|| CategoryServiceError::NotFound(id.to_string()))?;

        if let Some(ref name) = input.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CategoryServiceError::ValidationError(
                    "Category name cannot be empty".to_string(),
                ));
            }
            if name != existing.name
                && self
                    .repo
                    .exists_by_name(name)
                    .await
                    .context("Failed to check category name")?
            {
                return Err(CategoryServiceError::DuplicateName(name.to_string()));
            }
        }

        let category = self
            .repo
            .update(id, &input)
            .await
            .context("Failed to update category")?;

        Ok(category)
    }

    /// List all categories in creation order
    pub async fn list(&self) -> Result<Vec<Category>, CategoryServiceError> {
        let categories = self
            .repo
            .list()
            .await
            .context("Failed to list categories")?;
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxCategoryRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> CategoryService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        CategoryService::new(SqlxCategoryRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_seeded_roster_present() {
        let service = setup().await;

        let names: Vec<String> = service
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["mahalliy", "Xorij", "sport", "Texnologiya"]);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let service = setup().await;

        let err = service
            .create("sport")
            .await
            .expect_err("Should reject duplicate");
        assert!(matches!(err, CategoryServiceError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = setup().await;

        let err = service.create("   ").await.expect_err("Should reject");
        assert!(matches!(err, CategoryServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_rename() {
        let service = setup().await;

        let category = service.create("madaniyat").await.expect("create");
        let renamed = service
            .update(
                category.id,
                UpdateCategoryInput {
                    name: Some("san'at".to_string()),
                },
            )
            .await
            .expect("update");
        assert_eq!(renamed.name, "san'at");
    }
}
