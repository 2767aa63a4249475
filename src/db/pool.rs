//! Database connection pool
//!
//! SQLite-backed connection pool creation. File-based databases get their
//! parent directory created and the `mode=rwc` option appended; `:memory:`
//! is supported for tests.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Create a connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    connect(&config.url).await
}

async fn connect(url: &str) -> Result<SqlitePool> {
    // Ensure the database directory exists for file-based SQLite
    if !url.starts_with(":memory:") && !url.starts_with("sqlite::memory:") {
        let path = if url.starts_with("sqlite:") {
            url.trim_start_matches("sqlite:")
        } else {
            url
        };

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }
    }

    let connection_url = if url.starts_with("sqlite:") {
        // If it already has options, don't modify
        if url.contains('?') {
            url.to_string()
        } else {
            format!("{}?mode=rwc", url)
        }
    } else if url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{}?mode=rwc", url)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(20)
        .connect(&connection_url)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    // Enable foreign keys for SQLite
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("Failed to enable foreign keys")?;

    Ok(pool)
}

/// Create an in-memory pool for tests
pub async fn create_test_pool() -> Result<SqlitePool> {
    // Single connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("Failed to create in-memory database")?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("Failed to enable foreign keys")?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_pool() {
        let pool = create_test_pool().await.expect("Failed to create pool");

        let row: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to query");
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_test_pool().await.expect("Failed to create pool");

        let row: (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .expect("Failed to query pragma");
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_create_pool_memory_url() {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
        };
        let pool = create_pool(&config).await.expect("Failed to create pool");

        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("Pool should be usable");
    }

    #[tokio::test]
    async fn test_create_pool_file_url_creates_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("nested/dir/test.db");
        let config = DatabaseConfig {
            url: db_path.display().to_string(),
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");

        assert!(db_path.parent().unwrap().exists());
        pool.close().await;
    }
}
