//! User repository
//!
//! Database operations for user accounts and their profiles.

use crate::models::{CreateUserInput, Profile, UpdateProfileInput, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user. `input.password` must already be hashed.
    async fn create(&self, input: &CreateUserInput) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Check if a username is taken
    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    /// Check if an email is taken
    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// List superusers
    async fn list_superusers(&self) -> Result<Vec<User>>;

    /// Update a user's own fields and profile
    async fn update_profile(&self, user_id: i64, input: &UpdateProfileInput) -> Result<User>;

    /// Get the profile belonging to a user, if one exists
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;
}

/// SQLx-based user repository implementation
pub struct SqlxUserRepository {
    pool: SqlitePool,
}

impl SqlxUserRepository {
    /// Create a new SQLx user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, is_superuser, created_at, updated_at";

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, input: &CreateUserInput) -> Result<User> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash, is_superuser, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.password)
        .bind(input.is_superuser)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create user")?;

        let user_id = result.last_insert_rowid();

        // Every user gets an empty profile row
        sqlx::query("INSERT INTO profiles (user_id) VALUES (?)")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("Failed to create profile")?;

        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found after create"))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get user by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user by username")?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check username existence")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check email existence")?;

        let count: i64 = row.get("count");
        Ok(count > 0)
    }

    async fn list_superusers(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users WHERE is_superuser = 1 ORDER BY username",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list superusers")?;

        rows.iter().map(row_to_user).collect()
    }

    async fn update_profile(&self, user_id: i64, input: &UpdateProfileInput) -> Result<User> {
        let existing = self
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let now = Utc::now();
        let first_name = input.first_name.as_ref().unwrap_or(&existing.first_name);
        let last_name = input.last_name.as_ref().unwrap_or(&existing.last_name);
        let email = input.email.as_ref().unwrap_or(&existing.email);

        sqlx::query(
            "UPDATE users SET first_name = ?, last_name = ?, email = ?, updated_at = ? WHERE id = ?",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to update user")?;

        if input.date_of_birth.is_some() || input.photo.is_some() {
            let profile = self.get_profile(user_id).await?;
            let date_of_birth = input
                .date_of_birth
                .or_else(|| profile.as_ref().and_then(|p| p.date_of_birth));
            let photo = input
                .photo
                .clone()
                .or_else(|| profile.as_ref().and_then(|p| p.photo.clone()));

            sqlx::query(
                r#"
                INSERT INTO profiles (user_id, date_of_birth, photo)
                VALUES (?, ?, ?)
                ON CONFLICT (user_id) DO UPDATE SET date_of_birth = ?, photo = ?
                "#,
            )
            .bind(user_id)
            .bind(date_of_birth)
            .bind(&photo)
            .bind(date_of_birth)
            .bind(&photo)
            .execute(&self.pool)
            .await
            .context("Failed to update profile")?;
        }

        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found after update"))
    }

    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        let row = sqlx::query(
            "SELECT id, user_id, date_of_birth, photo FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get profile")?;

        match row {
            Some(row) => Ok(Some(Profile {
                id: row.get("id"),
                user_id: row.get("user_id"),
                date_of_birth: row.get("date_of_birth"),
                photo: row.get("photo"),
            })),
            None => Ok(None),
        }
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        password_hash: row.get("password_hash"),
        is_superuser: row.get("is_superuser"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
