//! News API endpoints
//!
//! Public browsing (home, listings, category pages, search), the
//! authenticated detail page with comments and hit counting, and the
//! superuser-only create/edit/delete operations.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser, SessionToken};
use crate::models::{
    CommentWithAuthor, CreateNewsInput, ListParams, News, PagedResult, UpdateNewsInput,
    CATEGORY_FOREIGN, CATEGORY_LOCAL, CATEGORY_SPORT, CATEGORY_TECHNOLOGY,
};
use crate::services::{visitor_key, HomePage};
use axum::Extension;

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    fn params(&self) -> ListParams {
        ListParams::new(self.page.unwrap_or(1), self.per_page.unwrap_or(20))
    }
}

/// Search query parameters. `q` is required; its absence is a validation
/// error rather than a crash.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Detail payload: the news item plus its active comments and hit total
#[derive(Debug, Serialize)]
pub struct NewsDetailResponse {
    pub news: News,
    pub hits: i64,
    pub comments: Vec<CommentWithAuthor>,
    pub comment_count: i64,
}

/// Request body for posting a comment
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// GET / - home page aggregation
pub async fn home(State(state): State<AppState>) -> Result<Json<HomePage>, ApiError> {
    let page = state.news_service.home().await?;
    Ok(Json(page))
}

/// GET /news/ - all published news, newest first
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PagedResult<News>>, ApiError> {
    let page = state.news_service.list_published(query.params()).await?;
    Ok(Json(page))
}

/// GET /local/
pub async fn list_local(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    list_category(state, CATEGORY_LOCAL, query).await
}

/// GET /foreign/
pub async fn list_foreign(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    list_category(state, CATEGORY_FOREIGN, query).await
}

/// GET /texnology/
pub async fn list_technology(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    list_category(state, CATEGORY_TECHNOLOGY, query).await
}

/// GET /sport/
pub async fn list_sport(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<News>>, ApiError> {
    list_category(state, CATEGORY_SPORT, query).await
}

async fn list_category(
    state: AppState,
    name: &str,
    query: ListQuery,
) -> Result<Json<Vec<News>>, ApiError> {
    let params = query.params();
    let items = state
        .news_service
        .list_published_by_category_name(name, params.offset(), params.limit())
        .await?;
    Ok(Json(items))
}

/// GET /searchresult/?q=<keyword>
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PagedResult<News>>, ApiError> {
    let keyword = query.q.ok_or_else(|| {
        ApiError::with_details(
            "VALIDATION_ERROR",
            "Missing search keyword",
            serde_json::json!({ "field": "q" }),
        )
    })?;

    let params = ListParams::new(query.page.unwrap_or(1), query.per_page.unwrap_or(20));
    let page = state.news_service.search(&keyword, params, true).await?;
    Ok(Json(page))
}

/// GET /news/{slug}/ - detail page, auth required
///
/// Draft and missing slugs both resolve to the same 404. Each view records
/// a hit keyed by the caller's session, so refreshes do not inflate totals.
pub async fn detail(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(slug): Path<String>,
) -> Result<Json<NewsDetailResponse>, ApiError> {
    let news = state
        .news_service
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("News not found"))?;

    let key = visitor_key(&token.0);
    let hits = state
        .hit_service
        .record_view(news.id, &key)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    detail_payload(&state, news, hits).await
}

/// POST /news/{slug}/ - post a comment, auth required
///
/// Responds with the refreshed detail payload instead of redirecting.
pub async fn post_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(slug): Path<String>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<NewsDetailResponse>), ApiError> {
    let news = state
        .news_service
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("News not found"))?;

    state
        .comment_service
        .create(news.id, user.0.id, &body.body)
        .await?;

    let hits = state
        .hit_service
        .total(news.id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let payload = detail_payload(&state, news, hits).await?;
    Ok((StatusCode::CREATED, payload))
}

async fn detail_payload(
    state: &AppState,
    news: News,
    hits: i64,
) -> Result<Json<NewsDetailResponse>, ApiError> {
    let comments = state.comment_service.list_active_for_news(news.id).await?;
    let comment_count = state.comment_service.count_active_for_news(news.id).await?;

    Ok(Json(NewsDetailResponse {
        news,
        hits,
        comments,
        comment_count,
    }))
}

/// POST /news/create/ - superuser only
pub async fn create_news(
    State(state): State<AppState>,
    Json(input): Json<CreateNewsInput>,
) -> Result<(StatusCode, Json<News>), ApiError> {
    let news = state.news_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /news/{slug}/edit/ - superuser only; the slug never changes
pub async fn update_news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateNewsInput>,
) -> Result<Json<News>, ApiError> {
    let news = state.news_service.update_by_slug(&slug, input).await?;
    Ok(Json(news))
}

/// DELETE /news/{slug}/delete/ - superuser only, redirects home
pub async fn delete_news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.news_service.delete_by_slug(&slug).await?;
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, "/")]))
}
