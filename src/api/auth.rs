//! Account API endpoints
//!
//! Registration, login/logout with session cookies, and the profile
//! endpoints for the logged-in user.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser, SessionToken};
use crate::models::{Profile, UpdateProfileInput, User};
use crate::services::{LoginInput, RegisterInput};

/// Session cookie lifetime, kept in step with the service-side expiry
const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Response for user info
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_superuser: user.is_superuser,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response for successful login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Response for the current user with their profile
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
    pub profile: Option<Profile>,
}

fn session_cookie(token: &str, max_age: i64) -> Result<HeaderMap, ApiError> {
    let cookie = format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        token, max_age
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::internal_error(format!("Invalid cookie value: {}", e)))?,
    );
    Ok(headers)
}

/// POST /accounts/register/
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.register(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /accounts/login/
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, session) = state.user_service.login(input).await?;

    let headers = session_cookie(&session.id, SESSION_COOKIE_MAX_AGE_SECS)?;

    Ok((
        StatusCode::OK,
        headers,
        Json(AuthResponse {
            user: user.into(),
            token: session.id,
        }),
    ))
}

/// POST /accounts/logout/ - auth required
pub async fn logout(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<impl IntoResponse, ApiError> {
    state.user_service.logout(&token.0).await?;

    // Expire the cookie on the client too
    let headers = session_cookie("", 0)?;
    Ok((StatusCode::NO_CONTENT, headers))
}

/// GET /accounts/me/ - auth required
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<MeResponse>, ApiError> {
    let profile = state.user_service.get_profile(user.0.id).await?;

    Ok(Json(MeResponse {
        user: user.0.into(),
        profile,
    }))
}

/// PUT /accounts/profile/ - auth required, owner edits their own data
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<MeResponse>, ApiError> {
    let updated = state.user_service.update_profile(user.0.id, input).await?;
    let profile = state.user_service.get_profile(updated.id).await?;

    Ok(Json(MeResponse {
        user: updated.into(),
        profile,
    }))
}
