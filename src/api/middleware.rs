//! API middleware
//!
//! Session authentication, the superuser guard, and the shared error
//! payload. Guards are composed per route group; a failed guard always
//! produces an explicit 401/403 response.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::User;
use crate::services::{
    CategoryService, CategoryServiceError, CommentService, CommentServiceError, ContactService,
    ContactServiceError, HitService, NewsService, NewsServiceError, UserService, UserServiceError,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub news_service: Arc<NewsService>,
    pub category_service: Arc<CategoryService>,
    pub comment_service: Arc<CommentService>,
    pub contact_service: Arc<ContactService>,
    pub user_service: Arc<UserService>,
    pub hit_service: Arc<HitService>,
}

/// Authenticated user extracted from the request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// The raw session token the request authenticated with
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "CONFLICT" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<NewsServiceError> for ApiError {
    fn from(err: NewsServiceError) -> Self {
        match err {
            NewsServiceError::NotFound(_) => ApiError::not_found("News not found"),
            NewsServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            NewsServiceError::DuplicateSlug(slug) => {
                ApiError::conflict(format!("Slug already exists: {}", slug))
            }
            NewsServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<CategoryServiceError> for ApiError {
    fn from(err: CategoryServiceError) -> Self {
        match err {
            CategoryServiceError::NotFound(_) => ApiError::not_found("Category not found"),
            CategoryServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            CategoryServiceError::DuplicateName(name) => {
                ApiError::conflict(format!("Category name already exists: {}", name))
            }
            CategoryServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<CommentServiceError> for ApiError {
    fn from(err: CommentServiceError) -> Self {
        match err {
            CommentServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            CommentServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<ContactServiceError> for ApiError {
    fn from(err: ContactServiceError) -> Self {
        match err {
            ContactServiceError::ValidationError(fields) => ApiError::with_details(
                "VALIDATION_ERROR",
                "Invalid contact submission",
                serde_json::json!({ "fields": fields }),
            ),
            ContactServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::AuthenticationError(msg) => ApiError::unauthorized(msg),
            UserServiceError::ValidationError(fields) => ApiError::with_details(
                "VALIDATION_ERROR",
                "Invalid input",
                serde_json::json!({ "fields": fields }),
            ),
            UserServiceError::UserExists(msg) => ApiError::conflict(msg),
            UserServiceError::SessionExpired => ApiError::unauthorized("Session expired"),
            UserServiceError::SessionNotFound => {
                ApiError::unauthorized("Invalid or expired session")
            }
            UserServiceError::InternalError(e) => ApiError::internal_error(e.to_string()),
        }
    }
}

/// Extract session token from request
fn extract_session_token(request: &Request) -> Option<String> {
    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = request.headers().get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_session_token(&request)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let user = state
        .user_service
        .validate_session(&token)
        .await
        .map_err(|e| match e {
            UserServiceError::InternalError(e) => {
                ApiError::internal_error(format!("Session validation failed: {}", e))
            }
            _ => ApiError::unauthorized("Invalid or expired session"),
        })?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    request.extensions_mut().insert(SessionToken(token));
    Ok(next.run(request).await)
}

/// Superuser authorization middleware. Must run after `require_auth`.
pub async fn require_superuser(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !user.0.is_superuser {
        return Err(ApiError::forbidden("Superuser privileges required"));
    }

    Ok(next.run(request).await)
}


#[cfg(test)]
mod status_property_tests {
    use super::*;
    use proptest::prelude::*;

    fn code_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("UNAUTHORIZED"),
            Just("FORBIDDEN"),
            Just("NOT_FOUND"),
            Just("VALIDATION_ERROR"),
            Just("CONFLICT"),
            Just("INTERNAL_ERROR"),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn every_error_code_has_a_matching_status(code in code_strategy(), message in ".{0,40}") {
            let response = ApiError::new(code, message).into_response();
            let expected = match code {
                "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
                "FORBIDDEN" => StatusCode::FORBIDDEN,
                "NOT_FOUND" => StatusCode::NOT_FOUND,
                "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
                "CONFLICT" => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            prop_assert_eq!(response.status(), expected);
        }

        #[test]
        fn unknown_codes_fall_back_to_500(code in "[A-Z_]{1,20}") {
            prop_assume!(!matches!(
                code.as_str(),
                "UNAUTHORIZED" | "FORBIDDEN" | "NOT_FOUND" | "VALIDATION_ERROR" | "CONFLICT"
            ));
            let response = ApiError::new(code, "x").into_response();
            prop_assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
