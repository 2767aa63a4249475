//! News service
//!
//! Business logic for news items: creation with slug derivation, edits that
//! never touch the slug, deletion, the public published-only views, search,
//! and the home page aggregation.

use crate::db::repositories::{CategoryRepository, NewsRepository};
use crate::models::{
    Category, CreateNewsInput, ListParams, News, NewsStatus, PagedResult, UpdateNewsInput,
};
use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use slug::slugify;
use std::sync::Arc;

/// Number of items in each home page slice
const HOME_SLICE_SIZE: i64 = 5;

/// Error types for news service operations
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    /// News not found
    #[error("News not found: {0}")]
    NotFound(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Duplicate slug
    #[error("News slug already exists: {0}")]
    DuplicateSlug(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Home page aggregation: the category roster plus five most-recent
/// published items overall and per category. Slices may overlap.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub categories: Vec<Category>,
    pub latest: Vec<News>,
    pub local: Vec<News>,
    pub foreign: Vec<News>,
    pub sport: Vec<News>,
    pub technology: Vec<News>,
}

/// News service
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl NewsService {
    /// Create a new news service
    pub fn new(repo: Arc<dyn NewsRepository>, category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self {
            repo,
            category_repo,
        }
    }

    /// Create a news item
    ///
    /// When the slug is omitted or blank it is derived from the title.
    /// The category must exist and the slug must be unique.
    pub async fn create(&self, input: CreateNewsInput) -> Result<News, NewsServiceError> {
        if input.title.trim().is_empty() {
            return Err(NewsServiceError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }
        if input.body.trim().is_empty() {
            return Err(NewsServiceError::ValidationError(
                "Body cannot be empty".to_string(),
            ));
        }

        if self
            .category_repo
            .get_by_id(input.category_id)
            .await
            .context("Failed to check category")?
            .is_none()
        {
            return Err(NewsServiceError::ValidationError(format!(
                "Unknown category: {}",
                input.category_id
            )));
        }

        let slug = match input.slug {
            Some(ref s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&input.title),
        };

        if self
            .repo
            .exists_by_slug(&slug)
            .await
            .context("Failed to check slug uniqueness")?
        {
            return Err(NewsServiceError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let news = News {
            id: 0,
            title: input.title,
            slug,
            body: input.body,
            image: input.image.unwrap_or_default(),
            category_id: input.category_id,
            status: input.status.unwrap_or_default(),
            publish_time: now,
            created_time: now,
            updated_time: now,
        };

        let created = self
            .repo
            .create(&news)
            .await
            .context("Failed to create news")?;

        Ok(created)
    }

    /// Get a published news item by slug. Drafts resolve the same as
    /// missing slugs.
    pub async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<News>, NewsServiceError> {
        let news = self
            .repo
            .find_published_by_slug(slug)
            .await
            .context("Failed to get news by slug")?;
        Ok(news)
    }

    /// Update a news item addressed by slug. The slug itself is immutable;
    /// edits to one item never affect another.
    pub async fn update_by_slug(
        &self,
        slug: &str,
        input: UpdateNewsInput,
    ) -> Result<News, NewsServiceError> {
        let existing = self
            .repo
            .get_by_slug(slug)
            .await
            .context("Failed to get news by slug")?
            .ok_or_else(|| NewsServiceError::NotFound(slug.to_string()))?;

        // An empty edit leaves the row alone, updated_time included
        if !input.has_changes() {
            return Ok(existing);
        }

        if let Some(ref title) = input.title {
            if title.trim().is_empty() {
                return Err(NewsServiceError::ValidationError(
                    "Title cannot be empty".to_string(),
                ));
            }
        }
        if let Some(ref body) = input.body {
            if body.trim().is_empty() {
                return Err(NewsServiceError::ValidationError(
                    "Body cannot be empty".to_string(),
                ));
            }
        }
        if let Some(category_id) = input.category_id {
            if self
                .category_repo
                .get_by_id(category_id)
                .await
                .context("Failed to check category")?
                .is_none()
            {
                return Err(NewsServiceError::ValidationError(format!(
                    "Unknown category: {}",
                    category_id
                )));
            }
        }

        let updated = self
            .repo
            .update(existing.id, &input)
            .await
            .context("Failed to update news")?;

        Ok(updated)
    }

    /// Delete a news item addressed by slug
    pub async fn delete_by_slug(&self, slug: &str) -> Result<(), NewsServiceError> {
        let existing = self
            .repo
            .get_by_slug(slug)
            .await
            .context("Failed to get news by slug")?
            .ok_or_else(|| NewsServiceError::NotFound(slug.to_string()))?;

        self.repo
            .delete(existing.id)
            .await
            .context("Failed to delete news")?;

        Ok(())
    }

    /// List published news, newest first
    pub async fn list_published(
        &self,
        params: ListParams,
    ) -> Result<PagedResult<News>, NewsServiceError> {
        let items = self
            .repo
            .list_published(params.offset(), params.limit())
            .await
            .context("Failed to list published news")?;
        let total = self
            .repo
            .count_published()
            .await
            .context("Failed to count published news")?;

        Ok(PagedResult::new(items, total, &params))
    }

    /// List published news in the category with the given name
    ///
    /// An unknown category name yields an empty list, not an error.
    pub async fn list_published_by_category_name(
        &self,
        name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<News>, NewsServiceError> {
        let category = self
            .category_repo
            .get_by_name(name)
            .await
            .context("Failed to look up category")?;

        match category {
            Some(category) => {
                let items = self
                    .repo
                    .list_published_by_category(category.id, offset, limit)
                    .await
                    .context("Failed to list news by category")?;
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Home page aggregation
    pub async fn home(&self) -> Result<HomePage, NewsServiceError> {
        let categories = self
            .category_repo
            .list()
            .await
            .context("Failed to list categories")?;

        let latest = self
            .repo
            .list_published(0, HOME_SLICE_SIZE)
            .await
            .context("Failed to list latest news")?;

        let local = self
            .list_published_by_category_name(crate::models::CATEGORY_LOCAL, 0, HOME_SLICE_SIZE)
            .await?;
        let foreign = self
            .list_published_by_category_name(crate::models::CATEGORY_FOREIGN, 0, HOME_SLICE_SIZE)
            .await?;
        let sport = self
            .list_published_by_category_name(crate::models::CATEGORY_SPORT, 0, HOME_SLICE_SIZE)
            .await?;
        let technology = self
            .list_published_by_category_name(
                crate::models::CATEGORY_TECHNOLOGY,
                0,
                HOME_SLICE_SIZE,
            )
            .await?;

        Ok(HomePage {
            categories,
            latest,
            local,
            foreign,
            sport,
            technology,
        })
    }

    /// Case-insensitive substring search over title and body
    pub async fn search(
        &self,
        keyword: &str,
        params: ListParams,
        published_only: bool,
    ) -> Result<PagedResult<News>, NewsServiceError> {
        let items = self
            .repo
            .search(keyword, params.offset(), params.limit(), published_only)
            .await
            .context("Failed to search news")?;
        let total = self
            .repo
            .count_search(keyword, published_only)
            .await
            .context("Failed to count search matches")?;

        Ok(PagedResult::new(items, total, &params))
    }

    /// Admin listing: any status, optionally filtered to one
    pub async fn admin_list(
        &self,
        status: Option<NewsStatus>,
        params: ListParams,
    ) -> Result<PagedResult<News>, NewsServiceError> {
        let (items, total) = match status {
            Some(status) => {
                let items = self
                    .repo
                    .list_by_status(status, params.offset(), params.limit())
                    .await
                    .context("Failed to list news by status")?;
                let total = self
                    .repo
                    .count_by_status(status)
                    .await
                    .context("Failed to count news by status")?;
                (items, total)
            }
            None => {
                let items = self
                    .repo
                    .list(params.offset(), params.limit())
                    .await
                    .context("Failed to list news")?;
                let total = self.repo.count().await.context("Failed to count news")?;
                (items, total)
            }
        };

        Ok(PagedResult::new(items, total, &params))
    }
}
