//! Data models
//!
//! Database entities and input types used throughout the news service:
//! News, Category, Comment, Contact, User, Profile and Session.

mod category;
mod comment;
mod contact;
mod news;
mod session;
mod user;

pub use category::{
    Category, UpdateCategoryInput, CATEGORY_FOREIGN, CATEGORY_LOCAL, CATEGORY_SPORT,
    CATEGORY_TECHNOLOGY,
};
pub use comment::{Comment, CommentWithAuthor, CreateCommentInput};
pub use contact::{Contact, CreateContactInput};
pub use news::{
    CreateNewsInput, ListParams, News, NewsStatus, PagedResult, UpdateNewsInput,
};
pub use session::Session;
pub use user::{CreateUserInput, Profile, UpdateProfileInput, User};
