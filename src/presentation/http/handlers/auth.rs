//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{
    AdminCheckResponse, AuthCheckResponse, LoginResponse, MessageResponse, RegisterResponse,
};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Register a new user and log them in
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    // Validate request
    body.validate().map_err(validation_error)?;

    // Create service
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let auth_service = AuthServiceImpl::new(user_repo, state.settings.jwt.clone());

    // Register user; registration doubles as login, so a token is issued
    let (user, token) = auth_service
        .register(&body.username, &body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::EmailExists | AuthError::UsernameExists => {
                AppError::Conflict("Username or email already in use.".into())
            }
            e => AppError::Internal(e.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(RegisterResponse::new(user, token))))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Validate request
    body.validate().map_err(validation_error)?;

    // Create service
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let auth_service = AuthServiceImpl::new(user_repo, state.settings.jwt.clone());

    // Authenticate
    let (user, token) = auth_service
        .authenticate(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials, could not log you in.".into())
            }
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(LoginResponse::new(user, token)))
}

/// Logout
///
/// Tokens are stateless and simply expire; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out."))
}

/// Report the caller's authentication status
pub async fn check_is_authenticated(
    Extension(auth_user): Extension<AuthUser>,
) -> Json<AuthCheckResponse> {
    Json(AuthCheckResponse {
        authenticated: true,
        user_id: auth_user.user_id,
    })
}

/// Report whether the caller is an administrator
pub async fn check_is_admin(Extension(_auth_user): Extension<AuthUser>) -> Json<AdminCheckResponse> {
    // TODO: add a role column to users; until then every account reports
    // as non-admin.
    Json(AdminCheckResponse { is_admin: false })
}
