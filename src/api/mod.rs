//! API layer - HTTP handlers and routing
//!
//! Route groups mirror the access model: public browsing, authenticated
//! reader actions (detail view, comments, own profile), and the
//! superuser-only management surface. Guards are attached per group with
//! `route_layer`, so an unauthorized request is always answered with an
//! explicit 401/403.

pub mod admin;
pub mod auth;
pub mod contact;
pub mod middleware;
pub mod news;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState, AuthenticatedUser, SessionToken};

/// GET /xatolik/ - generic error payload
async fn xatolik() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "error": {
            "code": "XATOLIK",
            "message": "Xatolik yuz berdi"
        }
    }))
}

/// Build the application router
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    // Superuser management surface
    let superuser_routes = Router::new()
        .route("/news/create/", post(news::create_news))
        .route("/news/{slug}/edit/", put(news::update_news))
        .route("/news/{slug}/delete/", delete(news::delete_news))
        .route("/adminpage/", get(admin::admin_page))
        .route("/admin/news/", get(admin::list_news))
        .route(
            "/admin/categories/",
            get(admin::list_categories).post(admin::create_category),
        )
        .route("/admin/categories/{id}/", put(admin::update_category))
        .route("/admin/contacts/", get(admin::list_contacts))
        .route("/admin/comments/", get(admin::list_comments))
        .route("/admin/comments/disable", post(admin::disable_comments))
        .route("/admin/comments/activate", post(admin::activate_comments))
        .route_layer(axum_middleware::from_fn(middleware::require_superuser))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Routes for any logged-in user
    let protected_routes = Router::new()
        .route("/news/{slug}/", get(news::detail).post(news::post_comment))
        .route("/accounts/logout/", post(auth::logout))
        .route("/accounts/me/", get(auth::me))
        .route("/accounts/profile/", put(auth::update_profile))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // CORS allows cookie-based auth from the configured origin
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(news::home))
        .route("/news/", get(news::list_news))
        .route("/local/", get(news::list_local))
        .route("/foreign/", get(news::list_foreign))
        .route("/texnology/", get(news::list_technology))
        .route("/sport/", get(news::list_sport))
        .route("/searchresult/", get(news::search))
        .route(
            "/contact-us/",
            get(contact::contact_form).post(contact::submit_contact),
        )
        .route("/accounts/register/", post(auth::register))
        .route("/accounts/login/", post(auth::login))
        .route("/xatolik/", get(xatolik))
        .merge(superuser_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
