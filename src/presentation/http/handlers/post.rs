//! Post Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreatePostRequest, UpdatePostRequest};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{CreatePostDto, PostError, PostService, PostServiceImpl};
use crate::domain::Post;
use crate::infrastructure::repositories::{
    PgPostRepository, PgThreadRepository, PgUserRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

use super::parse_id;

fn post_service(
    state: &AppState,
) -> PostServiceImpl<PgPostRepository, PgThreadRepository, PgUserRepository> {
    PostServiceImpl::new(
        Arc::new(PgPostRepository::new(state.db.clone())),
        Arc::new(PgThreadRepository::new(state.db.clone())),
        Arc::new(PgUserRepository::new(state.db.clone())),
    )
}

fn map_error(e: PostError, raw_id: &str) -> AppError {
    match e {
        PostError::NotFound => {
            AppError::NotFound(format!("Could not find post with ID {}.", raw_id))
        }
        PostError::ThreadNotFound => {
            AppError::NotFound("Could not find a thread for the provided ID.".into())
        }
        PostError::AuthorNotFound => {
            AppError::NotFound("Could not find a user for the provided ID.".into())
        }
        PostError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List all posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = post_service(&state)
        .list_posts()
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok(Json(posts))
}

/// Get a post by ID
pub async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post_id = parse_id("post", &raw_id)?;

    let post = post_service(&state)
        .get_post(post_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(post))
}

/// List the posts in a thread, oldest first
pub async fn list_posts_by_thread(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Post>>, AppError> {
    let thread_id = parse_id("thread", &raw_id)?;

    let posts = post_service(&state)
        .list_posts_by_thread(thread_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(posts))
}

/// List posts authored by a user
pub async fn list_posts_by_author(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Post>>, AppError> {
    let author_id = parse_id("user", &raw_id)?;

    let posts = post_service(&state)
        .list_posts_by_author(author_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(posts))
}

/// Add a post to a thread
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    body.validate().map_err(validation_error)?;

    let post = post_service(&state)
        .create_post(CreatePostDto {
            author_id: body.author_id,
            thread_id: body.thread_id,
            content: body.content,
        })
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Edit a post's content
pub async fn update_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let post_id = parse_id("post", &raw_id)?;
    body.validate().map_err(validation_error)?;

    let post = post_service(&state)
        .update_post(post_id, body.content)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(post))
}

/// Delete a post
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let post_id = parse_id("post", &raw_id)?;

    post_service(&state)
        .delete_post(post_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(MessageResponse::new("Deleted post.")))
}
