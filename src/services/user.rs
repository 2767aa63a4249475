//! User service
//!
//! Registration, login/logout, session validation, and profile edits.
//! Sessions are opaque UUID tokens stored server-side with an expiry.

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{CreateUserInput, Profile, Session, UpdateProfileInput, User};
use crate::services::password::{hash_password, verify_password};
use crate::services::FieldError;
use anyhow::Context;
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Default session expiration time in days
const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error")]
    ValidationError(Vec<FieldError>),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Session expired
    #[error("Session expired")]
    SessionExpired,

    /// Session not found
    #[error("Session not found")]
    SessionNotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    pub password_2: String,
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// User service for managing accounts and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_expiration_days: i64,
}

impl UserService {
    /// Create a new user service with the given repositories
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days: DEFAULT_SESSION_EXPIRATION_DAYS,
        }
    }

    /// Register a new user
    ///
    /// Both password fields must match; a mismatch is reported against
    /// `password_2`. Usernames and emails are unique. New accounts are
    /// never superusers; those are promoted out of band.
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        self.validate_register_input(&input)?;

        if self
            .user_repo
            .exists_by_username(&input.username)
            .await
            .context("Failed to check username")?
        {
            return Err(UserServiceError::UserExists(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        if self
            .user_repo
            .exists_by_email(&input.email)
            .await
            .context("Failed to check email")?
        {
            return Err(UserServiceError::UserExists(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let user = self
            .user_repo
            .create(&CreateUserInput {
                username: input.username,
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                password: password_hash,
                is_superuser: false,
            })
            .await
            .context("Failed to create user")?;

        Ok(user)
    }

    /// Login with username and password
    ///
    /// Returns the user and a fresh session on success. Unknown usernames
    /// and wrong passwords produce the same error message.
    pub async fn login(&self, input: LoginInput) -> Result<(User, Session), UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to look up user")?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError("Invalid username or password".to_string())
            })?;

        let valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;
        if !valid {
            return Err(UserServiceError::AuthenticationError(
                "Invalid username or password".to_string(),
            ));
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::days(self.session_expiration_days);
        let session = self
            .session_repo
            .create(&token, user.id, expires_at)
            .await
            .context("Failed to create session")?;

        Ok((user, session))
    }

    /// Logout by deleting the session
    pub async fn logout(&self, token: &str) -> Result<(), UserServiceError> {
        self.session_repo
            .delete(token)
            .await
            .context("Failed to delete session")?;
        Ok(())
    }

    /// Resolve a session token into its user
    ///
    /// Expired sessions are deleted on sight and reported as expired.
    pub async fn validate_session(&self, token: &str) -> Result<User, UserServiceError> {
        let session = self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to get session")?
            .ok_or(UserServiceError::SessionNotFound)?;

        if session.is_expired() {
            self.session_repo
                .delete(token)
                .await
                .context("Failed to delete expired session")?;
            return Err(UserServiceError::SessionExpired);
        }

        self.user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get session user")?
            .ok_or(UserServiceError::SessionNotFound)
    }

    /// Update the caller's own account fields and profile
    pub async fn update_profile(
        &self,
        user_id: i64,
        input: UpdateProfileInput,
    ) -> Result<User, UserServiceError> {
        if let Some(ref email) = input.email {
            if email.trim().is_empty() {
                return Err(UserServiceError::ValidationError(vec![FieldError::new(
                    "email",
                    "Email cannot be empty",
                )]));
            }

            let current = self
                .user_repo
                .get_by_id(user_id)
                .await
                .context("Failed to get user")?
                .ok_or(UserServiceError::SessionNotFound)?;

            if *email != current.email
                && self
                    .user_repo
                    .exists_by_email(email)
                    .await
                    .context("Failed to check email")?
            {
                return Err(UserServiceError::UserExists(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
        }

        let user = self
            .user_repo
            .update_profile(user_id, &input)
            .await
            .context("Failed to update profile")?;

        Ok(user)
    }

    /// Get a user's profile row
    pub async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>, UserServiceError> {
        let profile = self
            .user_repo
            .get_profile(user_id)
            .await
            .context("Failed to get profile")?;
        Ok(profile)
    }

    /// List superuser accounts
    pub async fn list_superusers(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self
            .user_repo
            .list_superusers()
            .await
            .context("Failed to list superusers")?;
        Ok(users)
    }

    fn validate_register_input(&self, input: &RegisterInput) -> Result<(), UserServiceError> {
        let mut errors = Vec::new();

        if input.username.trim().is_empty() {
            errors.push(FieldError::new("username", "Username is required"));
        }
        if input.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        }
        if input.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if input.password != input.password_2 {
            errors.push(FieldError::new("password_2", "Passwords do not match"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(UserServiceError::ValidationError(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxSessionRepository, SqlxUserRepository};
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> UserService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool),
        )
    }

    fn register_input(username: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: "secret123".to_string(),
            password_2: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let service = setup().await;

        let user = service
            .register(register_input("alice"))
            .await
            .expect("Failed to register");
        assert!(!user.is_superuser);

        let (logged_in, session) = service
            .login(LoginInput {
                username: "alice".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .expect("Failed to login");

        assert_eq!(logged_in.id, user.id);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_register_password_mismatch_names_password_2() {
        let service = setup().await;

        let mut input = register_input("bob");
        input.password_2 = "different".to_string();

        let err = service.register(input).await.expect_err("Should fail");
        match err {
            UserServiceError::ValidationError(errors) => {
                assert!(errors.iter().any(|e| e.field == "password_2"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        // No account was created
        let login = service
            .login(LoginInput {
                username: "bob".to_string(),
                password: "secret123".to_string(),
            })
            .await;
        assert!(matches!(
            login,
            Err(UserServiceError::AuthenticationError(_))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let service = setup().await;

        service
            .register(register_input("carol"))
            .await
            .expect("first register");

        let mut dup = register_input("carol");
        dup.email = "other@example.com".to_string();

        let err = service.register(dup).await.expect_err("Should fail");
        assert!(matches!(err, UserServiceError::UserExists(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = setup().await;
        service
            .register(register_input("dave"))
            .await
            .expect("register");

        let err = service
            .login(LoginInput {
                username: "dave".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .expect_err("Should fail");
        assert!(matches!(err, UserServiceError::AuthenticationError(_)));
    }

    #[tokio::test]
    async fn test_validate_session_roundtrip() {
        let service = setup().await;
        let user = service
            .register(register_input("erin"))
            .await
            .expect("register");
        let (_, session) = service
            .login(LoginInput {
                username: "erin".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .expect("login");

        let resolved = service
            .validate_session(&session.id)
            .await
            .expect("validate");
        assert_eq!(resolved.id, user.id);

        service.logout(&session.id).await.expect("logout");
        let err = service
            .validate_session(&session.id)
            .await
            .expect_err("Should be gone");
        assert!(matches!(err, UserServiceError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = setup().await;
        let user = service
            .register(register_input("fred"))
            .await
            .expect("register");

        let updated = service
            .update_profile(
                user.id,
                UpdateProfileInput {
                    first_name: Some("Fred".to_string()),
                    date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 1, 15),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.first_name, "Fred");

        let profile = service
            .get_profile(user.id)
            .await
            .expect("get profile")
            .expect("profile");
        assert_eq!(
            profile.date_of_birth,
            chrono::NaiveDate::from_ymd_opt(1990, 1, 15)
        );
    }
}
