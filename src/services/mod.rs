//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories. They own
//! validation, password hashing, session lifecycles, and hit counting.

pub mod category;
pub mod comment;
pub mod contact;
pub mod hits;
pub mod news;
pub mod password;
pub mod user;

use serde::Serialize;

pub use category::{CategoryService, CategoryServiceError};
pub use comment::{CommentService, CommentServiceError};
pub use contact::{ContactService, ContactServiceError};
pub use hits::{visitor_key, HitService};
pub use news::{HomePage, NewsService, NewsServiceError};
pub use password::{hash_password, verify_password};
pub use user::{LoginInput, RegisterInput, UserService, UserServiceError};

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
