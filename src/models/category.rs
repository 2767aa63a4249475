//! Category model
//!
//! Categories are a flat set of named labels. The four fixed names used by
//! the public category pages are seeded by the migrations: "mahalliy",
//! "Xorij", "sport" and "Texnologiya".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier
    pub id: i64,
    /// Category name (unique)
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fixed category name for local news
pub const CATEGORY_LOCAL: &str = "mahalliy";
/// Fixed category name for foreign news
pub const CATEGORY_FOREIGN: &str = "Xorij";
/// Fixed category name for sport news
pub const CATEGORY_SPORT: &str = "sport";
/// Fixed category name for technology news
pub const CATEGORY_TECHNOLOGY: &str = "Texnologiya";

/// Input for updating a category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryInput {
    /// New name (optional)
    pub name: Option<String>,
}
