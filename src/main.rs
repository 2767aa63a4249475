//! Xabar - a small news publishing service

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xabar::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SessionRepository, SqlxCategoryRepository, SqlxCommentRepository,
            SqlxContactRepository, SqlxHitRepository, SqlxNewsRepository, SqlxSessionRepository,
            SqlxUserRepository,
        },
    },
    services::{
        CategoryService, CommentService, ContactService, HitService, NewsService, UserService,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xabar=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Xabar news service...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let news_repo = SqlxNewsRepository::boxed(pool.clone());
    let category_repo = SqlxCategoryRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());
    let contact_repo = SqlxContactRepository::boxed(pool.clone());
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let hit_repo = SqlxHitRepository::boxed(pool.clone());

    // Clear out sessions that expired while the service was down
    let expired = session_repo.delete_expired().await?;
    if expired > 0 {
        tracing::info!("Removed {} expired session(s)", expired);
    }

    // Initialize services
    let news_service = Arc::new(NewsService::new(news_repo, category_repo.clone()));
    let category_service = Arc::new(CategoryService::new(category_repo));
    let comment_service = Arc::new(CommentService::new(comment_repo));
    let contact_service = Arc::new(ContactService::new(contact_repo));
    let user_service = Arc::new(UserService::new(user_repo, session_repo));
    let hit_service = Arc::new(HitService::new(hit_repo));

    // Build application state
    let state = AppState {
        pool: pool.clone(),
        news_service,
        category_service,
        comment_service,
        contact_service,
        user_service,
        hit_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
