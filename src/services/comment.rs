//! Comment service
//!
//! Comment creation on news items plus the admin moderation views and the
//! bulk activate/deactivate actions.

use crate::db::repositories::CommentRepository;
use crate::models::{Comment, CommentWithAuthor, CreateCommentInput, ListParams, PagedResult};
use anyhow::Context;
use std::sync::Arc;

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    /// Create a new comment service
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// Post a comment on a news item. Comments start active.
    pub async fn create(
        &self,
        news_id: i64,
        user_id: i64,
        body: &str,
    ) -> Result<Comment, CommentServiceError> {
        if body.trim().is_empty() {
            return Err(CommentServiceError::ValidationError(
                "Comment body cannot be empty".to_string(),
            ));
        }

        let comment = self
            .repo
            .create(&CreateCommentInput {
                news_id,
                user_id,
                body: body.trim().to_string(),
            })
            .await
            .context("Failed to create comment")?;

        Ok(comment)
    }

    /// Active comments on a news item, oldest first, with author names
    pub async fn list_active_for_news(
        &self,
        news_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, CommentServiceError> {
        let comments = self
            .repo
            .list_active_by_news(news_id)
            .await
            .context("Failed to list comments")?;
        Ok(comments)
    }

    /// Count active comments on a news item
    pub async fn count_active_for_news(&self, news_id: i64) -> Result<i64, CommentServiceError> {
        let count = self
            .repo
            .count_active_by_news(news_id)
            .await
            .context("Failed to count comments")?;
        Ok(count)
    }

    /// Admin listing across all news, optionally filtered by active flag
    pub async fn admin_list(
        &self,
        active: Option<bool>,
        params: ListParams,
    ) -> Result<PagedResult<Comment>, CommentServiceError> {
        let items = self
            .repo
            .list(active, params.offset(), params.limit())
            .await
            .context("Failed to list comments")?;
        let total = self
            .repo
            .count(active)
            .await
            .context("Failed to count comments")?;

        Ok(PagedResult::new(items, total, &params))
    }

    /// Bulk-set the active flag on the given comment ids.
    /// Returns the number of rows touched; unknown ids are skipped.
    pub async fn set_active(
        &self,
        ids: &[i64],
        active: bool,
    ) -> Result<u64, CommentServiceError> {
        if ids.is_empty() {
            return Err(CommentServiceError::ValidationError(
                "No comment ids given".to_string(),
            ));
        }

        let affected = self
            .repo
            .set_active(ids, active)
            .await
            .context("Failed to update comments")?;

        Ok(affected)
    }
}
