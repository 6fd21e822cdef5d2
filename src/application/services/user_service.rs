//! User Service
//!
//! Profile reads and updates for user accounts.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::services::auth_service::{self, AuthError};
use crate::domain::{User, UserRepository};

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> Result<User, UserError>;

    /// Update a user's profile
    async fn update_profile(&self, user_id: Uuid, update: UpdateProfileDto) -> Result<User, UserError>;

    /// Delete a user account
    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserError>;
}

/// Profile update request; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already in use")]
    EmailExists,

    #[error("Username already in use")]
    UsernameExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for UserError {
    fn from(e: AuthError) -> Self {
        UserError::Internal(e.to_string())
    }
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.user_repo
            .find_all()
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    async fn get_user(&self, user_id: Uuid) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    async fn update_profile(&self, user_id: Uuid, update: UpdateProfileDto) -> Result<User, UserError> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)?;

        // Re-validate uniqueness only for fields that actually change
        if let Some(email) = update.email {
            if !email.eq_ignore_ascii_case(&user.email)
                && self
                    .user_repo
                    .email_exists(&email)
                    .await
                    .map_err(|e| UserError::Internal(e.to_string()))?
            {
                return Err(UserError::EmailExists);
            }
            user.email = email;
        }

        if let Some(username) = update.username {
            if !username.eq_ignore_ascii_case(&user.username)
                && self
                    .user_repo
                    .username_exists(&username)
                    .await
                    .map_err(|e| UserError::Internal(e.to_string()))?
            {
                return Err(UserError::UsernameExists);
            }
            user.username = username;
        }

        // Hash exactly once, and only when the password field is present;
        // re-saving an unchanged password must not re-hash it.
        if let Some(password) = update.password {
            user.password_hash = auth_service::hash_password(&password)?;
        }

        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }

        self.user_repo
            .update(&user)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)?;

        // TODO: cascade-delete (or reattribute) the user's threads and
        // posts; their author references currently dangle after this.
        if user.has_content() {
            tracing::warn!(
                user_id = %user.id,
                threads = user.threads.len(),
                posts = user.posts.len(),
                "Deleting account that still has authored content"
            );
        }

        self.user_repo
            .delete(user.id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }
}
