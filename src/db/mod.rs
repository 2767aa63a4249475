//! Database layer
//!
//! SQLite-backed persistence via sqlx:
//! - `pool` creates the connection pool
//! - `migrations` applies the embedded schema migrations
//! - `repositories` holds the per-entity data access traits and
//!   their sqlx implementations

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
