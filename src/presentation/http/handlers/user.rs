//! User Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::application::dto::request::UpdateUserRequest;
use crate::application::dto::response::{MessageResponse, UserResponse};
use crate::application::services::{UpdateProfileDto, UserError, UserService, UserServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

use super::parse_id;

fn user_service(state: &AppState) -> UserServiceImpl<PgUserRepository> {
    UserServiceImpl::new(Arc::new(PgUserRepository::new(state.db.clone())))
}

fn map_error(e: UserError, raw_id: &str) -> AppError {
    match e {
        UserError::NotFound => {
            AppError::NotFound(format!("Could not find user with ID {}.", raw_id))
        }
        UserError::EmailExists | UserError::UsernameExists => {
            AppError::Conflict("Username or email already in use.".into())
        }
        UserError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_service(&state)
        .list_users()
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_id("user", &raw_id)?;

    let user = user_service(&state)
        .get_user(user_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(UserResponse::from(user)))
}

/// Update a user's profile
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_id("user", &raw_id)?;
    body.validate().map_err(validation_error)?;

    let update = UpdateProfileDto {
        username: body.username,
        email: body.email,
        password: body.password,
        avatar: body.avatar,
    };

    let user = user_service(&state)
        .update_profile(user_id, update)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user account
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = parse_id("user", &raw_id)?;

    user_service(&state)
        .delete_user(user_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(MessageResponse::new("Deleted user.")))
}
