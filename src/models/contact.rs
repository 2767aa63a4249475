//! Contact message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact message entity. Append-only; there is no visitor-facing read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message text
    pub message: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a contact message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactInput {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Message text
    pub message: String,
}
