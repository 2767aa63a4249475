//! Hit counting
//!
//! Per-news view totals. Viewing a news item requires a session, so the
//! visitor is identified by their session token; each visitor key counts
//! at most once per news item.

use crate::db::repositories::HitRepository;
use anyhow::Result;
use std::sync::Arc;

/// Derive the deduplication key for a view. Namespaced so other key kinds
/// can share the hit log without colliding.
pub fn visitor_key(session_token: &str) -> String {
    format!("session:{}", session_token)
}

/// Hit service
pub struct HitService {
    repo: Arc<dyn HitRepository>,
}

impl HitService {
    /// Create a new hit service
    pub fn new(repo: Arc<dyn HitRepository>) -> Self {
        Self { repo }
    }

    /// Record a view and return the updated hit total.
    /// Repeat views with the same visitor key do not change the total.
    pub async fn record_view(&self, news_id: i64, visitor_key: &str) -> Result<i64> {
        self.repo.record(news_id, visitor_key).await?;
        self.repo.count_by_news(news_id).await
    }

    /// Current hit total for a news item
    pub async fn total(&self, news_id: i64) -> Result<i64> {
        self.repo.count_by_news(news_id).await
    }
}
