//! Authentication Service
//!
//! Handles registration, credential verification and bearer-token issuance.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::domain::{User, UserRepository};

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and log them in
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthToken), AuthError>;

    /// Authenticate user with credentials
    async fn authenticate(&self, email: &str, password: &str) -> Result<(User, AuthToken), AuthError>;
}

/// Issued bearer token
#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailExists,

    #[error("Username already exists")]
    UsernameExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Hash a password using Argon2id.
///
/// Called exactly once per password-field change; re-saving an unchanged
/// password must never pass through here again.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Issue a signed bearer token for a user
pub fn issue_token(user: &User, settings: &JwtSettings) -> Result<AuthToken, AuthError> {
    let now = Utc::now();
    let expiry = now + Duration::minutes(settings.token_expiry_minutes);

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: expiry.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(AuthToken {
        token,
        expires_in: settings.token_expiry_minutes * 60,
        token_type: "Bearer".to_string(),
    })
}

/// Decode and validate a bearer token
pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidCredentials)?;

    Ok(token_data.claims)
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    jwt_settings: JwtSettings,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<U>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repo,
            jwt_settings,
        }
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthToken), AuthError> {
        // Uniqueness pre-checks are case-insensitive
        if self
            .user_repo
            .email_exists(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            return Err(AuthError::EmailExists);
        }

        if self
            .user_repo
            .username_exists(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            return Err(AuthError::UsernameExists);
        }

        let password_hash = hash_password(password)?;

        let user = User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            join_date: Utc::now(),
            avatar: None,
            posts: Vec::new(),
            threads: Vec::new(),
        };

        let created_user = self
            .user_repo
            .create(&user)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let token = issue_token(&created_user, &self.jwt_settings)?;

        tracing::info!(username = %created_user.username, "Created new user");

        Ok((created_user, token))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<(User, AuthToken), AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(&user, &self.jwt_settings)?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use crate::shared::error::AppError;

    /// In-memory stand-in for the Postgres user repository.
    #[derive(Default)]
    struct InMemoryUserRepo {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<User>, AppError> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn create(&self, user: &User) -> Result<User, AppError> {
            self.users.lock().unwrap().push(user.clone());
            Ok(user.clone())
        }

        async fn update(&self, user: &User) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
            let stored = users
                .iter_mut()
                .find(|u| u.id == user.id)
                .expect("updating a user that was never stored");
            *stored = user.clone();
            Ok(user.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), AppError> {
            self.users.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }

        async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(email)))
        }

        async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.username.eq_ignore_ascii_case(username)))
        }
    }

    fn jwt_settings() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-test-secret-test-secret!".into(),
            token_expiry_minutes: 60,
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::now_v7(),
            username: "someone".into(),
            email: "someone@example.com".into(),
            password_hash: String::new(),
            join_date: Utc::now(),
            avatar: None,
            posts: vec![],
            threads: vec![],
        }
    }

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hash = hash_password("correct horse battery").expect("hash");

        assert!(verify_password("correct horse battery", &hash).expect("verify"));
        assert!(!verify_password("wrong password", &hash).expect("verify"));
    }

    #[test]
    fn test_hashing_is_salted() {
        let first = hash_password("same input").expect("hash");
        let second = hash_password("same input").expect("hash");

        // Fresh salt every time, so hashes differ even for equal input
        assert_ne!(first, second);
    }

    #[test]
    fn test_issued_token_decodes_to_user_identity() {
        let settings = jwt_settings();
        let user = test_user();

        let issued = issue_token(&user, &settings).expect("issue");
        let claims = decode_token(&issued.token, &settings).expect("decode");

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn test_issued_token_expires_in_one_hour() {
        let settings = jwt_settings();
        let user = test_user();

        let issued = issue_token(&user, &settings).expect("issue");
        let claims = decode_token(&issued.token, &settings).expect("decode");

        assert_eq!(issued.expires_in, 3600);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = AuthServiceImpl::new(Arc::new(InMemoryUserRepo::default()), jwt_settings());

        service
            .register("first", "someone@example.com", "longenough")
            .await
            .expect("first registration");

        // Pre-check compares case-insensitively
        let err = service
            .register("second", "SOMEONE@example.com", "longenough")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailExists));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let service = AuthServiceImpl::new(Arc::new(InMemoryUserRepo::default()), jwt_settings());

        service
            .register("someone", "first@example.com", "longenough")
            .await
            .expect("first registration");

        let err = service
            .register("SOMEONE", "second@example.com", "longenough")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UsernameExists));
    }

    #[tokio::test]
    async fn test_register_issues_token_for_created_user() {
        let repo = Arc::new(InMemoryUserRepo::default());
        let service = AuthServiceImpl::new(Arc::clone(&repo), jwt_settings());

        let (user, token) = service
            .register("someone", "someone@example.com", "longenough")
            .await
            .expect("register");

        let claims = decode_token(&token.token, &jwt_settings()).expect("decode");
        assert_eq!(claims.sub, user.id.to_string());

        let stored = repo.find_by_email("someone@example.com").await.expect("lookup");
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_verifies_stored_password() {
        let service = AuthServiceImpl::new(Arc::new(InMemoryUserRepo::default()), jwt_settings());

        service
            .register("someone", "someone@example.com", "correct horse")
            .await
            .expect("register");

        assert!(service
            .authenticate("someone@example.com", "correct horse")
            .await
            .is_ok());

        let err = service
            .authenticate("someone@example.com", "wrong password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let settings = jwt_settings();
        let other = JwtSettings {
            secret: "another-secret-another-secret-anoth!".into(),
            token_expiry_minutes: 60,
        };
        let user = test_user();

        let issued = issue_token(&user, &settings).expect("issue");

        assert!(decode_token(&issued.token, &other).is_err());
    }
}
