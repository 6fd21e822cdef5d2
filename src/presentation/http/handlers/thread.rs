//! Thread Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateThreadRequest, ThreadListQuery, UpdateThreadRequest};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{
    CreateThreadDto, ThreadError, ThreadService, ThreadServiceImpl,
};
use crate::domain::Thread;
use crate::infrastructure::repositories::{
    PgBoardRepository, PgThreadRepository, PgUserRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

use super::parse_id;

fn thread_service(
    state: &AppState,
) -> ThreadServiceImpl<PgThreadRepository, PgBoardRepository, PgUserRepository> {
    ThreadServiceImpl::new(
        Arc::new(PgThreadRepository::new(state.db.clone())),
        Arc::new(PgBoardRepository::new(state.db.clone())),
        Arc::new(PgUserRepository::new(state.db.clone())),
    )
}

fn map_error(e: ThreadError, raw_id: &str) -> AppError {
    match e {
        ThreadError::NotFound => {
            AppError::NotFound(format!("Could not find thread with ID {}.", raw_id))
        }
        ThreadError::BoardNotFound => {
            AppError::NotFound(format!("Could not find board with ID {}.", raw_id))
        }
        ThreadError::UserNotFound => {
            AppError::NotFound(format!("Could not find user with ID {}.", raw_id))
        }
        // Missing creation targets are malformed input, not missing resources
        ThreadError::MissingBoard => {
            AppError::Validation("Could not find a board for the provided ID.".into())
        }
        ThreadError::MissingAuthor => {
            AppError::Validation("Could not find a user for the provided ID.".into())
        }
        ThreadError::InvalidLimit => AppError::Validation("Limit must be at least 1.".into()),
        ThreadError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List all threads
pub async fn list_threads(State(state): State<AppState>) -> Result<Json<Vec<Thread>>, AppError> {
    let threads = thread_service(&state)
        .list_threads()
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok(Json(threads))
}

/// Get a thread by ID
pub async fn get_thread(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Thread>, AppError> {
    let thread_id = parse_id("thread", &raw_id)?;

    let thread = thread_service(&state)
        .get_thread(thread_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(thread))
}

/// List the most recent threads in a board
pub async fn list_threads_by_board(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<ThreadListQuery>,
) -> Result<Json<Vec<Thread>>, AppError> {
    let board_id = parse_id("board", &raw_id)?;
    query.validate().map_err(validation_error)?;

    let threads = thread_service(&state)
        .list_threads_by_board(board_id, query.limit)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(threads))
}

/// List threads authored by a user
pub async fn list_threads_by_author(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Thread>>, AppError> {
    let author_id = parse_id("user", &raw_id)?;

    let threads = thread_service(&state)
        .list_threads_by_author(author_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(threads))
}

/// Open a new thread in a board
pub async fn create_thread(
    State(state): State<AppState>,
    Json(body): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<Thread>), AppError> {
    body.validate().map_err(validation_error)?;

    let thread = thread_service(&state)
        .create_thread(CreateThreadDto {
            author_id: body.author_id,
            board_id: body.board_id,
            topic: body.topic,
        })
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok((StatusCode::CREATED, Json(thread)))
}

/// Rename a thread
pub async fn update_thread(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateThreadRequest>,
) -> Result<Json<Thread>, AppError> {
    let thread_id = parse_id("thread", &raw_id)?;
    body.validate().map_err(validation_error)?;

    let thread = thread_service(&state)
        .update_thread(thread_id, body.topic)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(thread))
}

/// Delete a thread
pub async fn delete_thread(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let thread_id = parse_id("thread", &raw_id)?;

    thread_service(&state)
        .delete_thread(thread_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(MessageResponse::new("Deleted thread.")))
}
