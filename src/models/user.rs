//! User and profile models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account.
///
/// Authorization is a single predicate: superusers may manage news,
/// categories and comments; everyone else only reads and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the user may perform privileged operations
    pub is_superuser: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Profile entity, one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier
    pub id: i64,
    /// Owning user ID
    pub user_id: i64,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Photo path or URL
    pub photo: Option<String>,
}

/// Input for creating a new user (before password hashing)
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Plaintext password (will be hashed)
    pub password: String,
    /// Whether the user is a superuser
    pub is_superuser: bool,
}

/// Input for updating a user's own account and profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileInput {
    /// New first name (optional)
    pub first_name: Option<String>,
    /// New last name (optional)
    pub last_name: Option<String>,
    /// New email (optional)
    pub email: Option<String>,
    /// New date of birth (optional)
    pub date_of_birth: Option<NaiveDate>,
    /// New photo (optional)
    pub photo: Option<String>,
}
