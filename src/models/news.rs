//! News model
//!
//! This module provides:
//! - `News` entity representing a news article
//! - `NewsStatus` enum for publication states
//! - Input types for creating and updating news
//! - Pagination types for list queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    /// Unique identifier
    pub id: i64,
    /// News title
    pub title: String,
    /// URL-friendly slug (immutable after creation)
    pub slug: String,
    /// Body text
    pub body: String,
    /// Image path or URL
    #[serde(default)]
    pub image: String,
    /// Category ID
    pub category_id: i64,
    /// Publication status
    pub status: NewsStatus,
    /// Publication timestamp
    pub publish_time: DateTime<Utc>,
    /// Creation timestamp
    pub created_time: DateTime<Utc>,
    /// Last update timestamp
    pub updated_time: DateTime<Utc>,
}

impl News {
    /// Check if the news item is publicly visible
    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published
    }
}

/// News publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    /// Draft - not visible to public
    #[default]
    Draft,
    /// Published - visible to public
    Published,
}

impl NewsStatus {
    /// Convert status to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Draft => "draft",
            NewsStatus::Published => "published",
        }
    }

    /// Parse status from database string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(NewsStatus::Draft),
            "published" => Some(NewsStatus::Published),
            _ => None,
        }
    }
}

impl std::fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for creating a news item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewsInput {
    /// News title
    pub title: String,
    /// URL-friendly slug (optional, derived from the title when absent)
    pub slug: Option<String>,
    /// Body text
    pub body: String,
    /// Image path or URL
    pub image: Option<String>,
    /// Category ID
    pub category_id: i64,
    /// Publication status (defaults to Draft)
    pub status: Option<NewsStatus>,
}

/// Input for updating a news item.
///
/// The slug is deliberately absent: it identifies the item and never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNewsInput {
    /// New title (optional)
    pub title: Option<String>,
    /// New body (optional)
    pub body: Option<String>,
    /// New image (optional)
    pub image: Option<String>,
    /// New category ID (optional)
    pub category_id: Option<i64>,
    /// New status (optional)
    pub status: Option<NewsStatus>,
}

impl UpdateNewsInput {
    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.body.is_some()
            || self.image.is_some()
            || self.category_id.is_some()
            || self.status.is_some()
    }
}

/// Pagination parameters for list queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

impl ListParams {
    /// Create new pagination parameters
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    /// Calculate the offset for database queries.
    /// Widened before multiplying so huge client-supplied pages cannot
    /// overflow u32.
    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1)) as i64 * self.per_page as i64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Paginated result container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
}

impl<T> PagedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, total: i64, params: &ListParams) -> Self {
        Self {
            items,
            total,
            page: params.page,
            per_page: params.per_page,
        }
    }

    /// Calculate the total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        ((self.total as u32) + self.per_page - 1) / self.per_page
    }

    /// Check if there is a next page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there is a previous page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(NewsStatus::from_str("draft"), Some(NewsStatus::Draft));
        assert_eq!(
            NewsStatus::from_str("PUBLISHED"),
            Some(NewsStatus::Published)
        );
        assert_eq!(NewsStatus::from_str("archived"), None);
        assert_eq!(NewsStatus::Published.as_str(), "published");
    }

    #[test]
    fn test_status_default_is_draft() {
        assert_eq!(NewsStatus::default(), NewsStatus::Draft);
    }

    #[test]
    fn test_list_params_clamping() {
        let params = ListParams::new(0, 1000);
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 100);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_list_params_offset() {
        let params = ListParams::new(3, 10);
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_list_params_offset_huge_page_does_not_overflow() {
        let params = ListParams::new(u32::MAX, 100);
        assert_eq!(params.offset(), (u32::MAX as i64 - 1) * 100);
    }

    #[test]
    fn test_paged_result_total_pages() {
        let params = ListParams::new(1, 10);
        let result: PagedResult<i64> = PagedResult::new(vec![1, 2, 3], 25, &params);
        assert_eq!(result.total_pages(), 3);
        assert!(result.has_next());
        assert!(!result.has_prev());
    }

    #[test]
    fn test_update_input_has_changes() {
        let empty = UpdateNewsInput::default();
        assert!(!empty.has_changes());

        let update = UpdateNewsInput {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        assert!(update.has_changes());
    }
}
