//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity.
///
/// Comments carry an `active` flag; only active comments appear on a news
/// detail page. Admins toggle the flag in bulk rather than deleting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: i64,
    /// News item the comment belongs to
    pub news_id: i64,
    /// Authoring user ID
    pub user_id: i64,
    /// Comment body
    pub body: String,
    /// Whether the comment is visible
    pub active: bool,
    /// Creation timestamp
    pub created_time: DateTime<Utc>,
}

/// Comment with its author's username, for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithAuthor {
    /// The comment itself
    #[serde(flatten)]
    pub comment: Comment,
    /// Author username
    pub username: String,
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    /// News item ID
    pub news_id: i64,
    /// Authoring user ID
    pub user_id: i64,
    /// Comment body
    pub body: String,
}
