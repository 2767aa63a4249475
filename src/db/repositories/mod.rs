//! Repositories
//!
//! Per-entity data access traits and their sqlx/SQLite implementations.
//! Services depend on the traits; the `Sqlx*` types are wired up in main.

mod category;
mod comment;
mod contact;
mod hit;
mod news;
mod session;
mod user;

pub use category::{CategoryRepository, SqlxCategoryRepository};
pub use comment::{CommentRepository, SqlxCommentRepository};
pub use contact::{ContactRepository, SqlxContactRepository};
pub use hit::{HitRepository, SqlxHitRepository};
pub use news::{NewsRepository, SqlxNewsRepository};
pub use session::{SessionRepository, SqlxSessionRepository};
pub use user::{SqlxUserRepository, UserRepository};
