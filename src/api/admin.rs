//! Admin API endpoints
//!
//! Everything here sits behind the superuser guard: the superuser roster,
//! moderation listings with pagination and filters, category management,
//! and the bulk comment actions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::auth::UserResponse;
use crate::api::middleware::{ApiError, AppState};
use crate::api::news::ListQuery;
use crate::models::{
    Category, Comment, Contact, ListParams, News, NewsStatus, PagedResult, UpdateCategoryInput,
};

/// Query parameters for the admin news listing
#[derive(Debug, Deserialize)]
pub struct AdminNewsQuery {
    pub status: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Query parameters for the admin comment listing
#[derive(Debug, Deserialize)]
pub struct AdminCommentQuery {
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Request body for the bulk comment actions
#[derive(Debug, Deserialize)]
pub struct CommentIdsRequest {
    pub ids: Vec<i64>,
}

/// Response for the bulk comment actions
#[derive(Debug, Serialize)]
pub struct BulkActionResponse {
    pub updated: u64,
}

/// GET /adminpage/ - superuser roster
pub async fn admin_page(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let superusers = state.user_service.list_superusers().await?;
    Ok(Json(superusers.into_iter().map(Into::into).collect()))
}

/// GET /admin/news/ - any status, optional status filter and keyword search
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<AdminNewsQuery>,
) -> Result<Json<PagedResult<News>>, ApiError> {
    let params = ListParams::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));

    if let Some(ref keyword) = query.q {
        // Admin search sees drafts too
        let page = state.news_service.search(keyword, params, false).await?;
        return Ok(Json(page));
    }

    let status = match query.status {
        Some(ref s) => Some(NewsStatus::from_str(s).ok_or_else(|| {
            ApiError::validation_error(format!("Unknown status: {}", s))
        })?),
        None => None,
    };

    let page = state.news_service.admin_list(status, params).await?;
    Ok(Json(page))
}

/// GET /admin/categories/
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.category_service.list().await?;
    Ok(Json(categories))
}

/// POST /admin/categories/
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.category_service.create(&body.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /admin/categories/{id}/
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateCategoryInput>,
) -> Result<Json<Category>, ApiError> {
    let category = state.category_service.update(id, input).await?;
    Ok(Json(category))
}

/// GET /admin/contacts/
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PagedResult<Contact>>, ApiError> {
    let params = ListParams::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let page = state.contact_service.list(params).await?;
    Ok(Json(page))
}

/// GET /admin/comments/ - optional active filter
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<AdminCommentQuery>,
) -> Result<Json<PagedResult<Comment>>, ApiError> {
    let params = ListParams::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let page = state
        .comment_service
        .admin_list(query.active, params)
        .await?;
    Ok(Json(page))
}

/// POST /admin/comments/disable - bulk deactivate
pub async fn disable_comments(
    State(state): State<AppState>,
    Json(body): Json<CommentIdsRequest>,
) -> Result<Json<BulkActionResponse>, ApiError> {
    let updated = state.comment_service.set_active(&body.ids, false).await?;
    Ok(Json(BulkActionResponse { updated }))
}

/// POST /admin/comments/activate - bulk reactivate
pub async fn activate_comments(
    State(state): State<AppState>,
    Json(body): Json<CommentIdsRequest>,
) -> Result<Json<BulkActionResponse>, ApiError> {
    let updated = state.comment_service.set_active(&body.ids, true).await?;
    Ok(Json(BulkActionResponse { updated }))
}
