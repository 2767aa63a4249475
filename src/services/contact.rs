//! Contact service
//!
//! Contact form intake: all three fields required, one row per valid
//! submission, nothing persisted on validation failure.

use crate::db::repositories::ContactRepository;
use crate::models::{Contact, CreateContactInput, ListParams, PagedResult};
use crate::services::FieldError;
use anyhow::Context;
use std::sync::Arc;

/// Error types for contact service operations
#[derive(Debug, thiserror::Error)]
pub enum ContactServiceError {
    /// Validation error with per-field messages
    #[error("Validation error")]
    ValidationError(Vec<FieldError>),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Contact service
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    /// Create a new contact service
    pub fn new(repo: Arc<dyn ContactRepository>) -> Self {
        Self { repo }
    }

    /// Store a contact form submission
    pub async fn submit(&self, input: CreateContactInput) -> Result<Contact, ContactServiceError> {
        let mut errors = Vec::new();
        if input.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if input.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        }
        if input.message.trim().is_empty() {
            errors.push(FieldError::new("message", "Message is required"));
        }
        if !errors.is_empty() {
            return Err(ContactServiceError::ValidationError(errors));
        }

        let contact = self
            .repo
            .create(&input)
            .await
            .context("Failed to store contact message")?;

        Ok(contact)
    }

    /// Admin listing, newest first
    pub async fn list(
        &self,
        params: ListParams,
    ) -> Result<PagedResult<Contact>, ContactServiceError> {
        let items = self
            .repo
            .list(params.offset(), params.limit())
            .await
            .context("Failed to list contact messages")?;
        let total = self
            .repo
            .count()
            .await
            .context("Failed to count contact messages")?;

        Ok(PagedResult::new(items, total, &params))
    }
}
