//! Session model
//!
//! A session is the opaque bearer credential issued at login: a random
//! token stored server-side together with its owning user and an expiry.
//! There is no refresh; an expired session stops authenticating and is
//! deleted on first sight.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token, also the primary key
    pub id: String,
    /// Owning user ID
    pub user_id: i64,
    /// Instant after which the token no longer authenticates
    pub expires_at: DateTime<Utc>,
    /// When the session was issued
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the token has passed its expiry
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
