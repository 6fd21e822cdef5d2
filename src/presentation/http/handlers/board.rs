//! Board Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateBoardRequest, UpdateBoardRequest};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{
    BoardError, BoardService, BoardServiceImpl, CreateBoardDto, UpdateBoardDto,
};
use crate::domain::Board;
use crate::infrastructure::repositories::{PgBoardRepository, PgCategoryRepository};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

use super::parse_id;

fn board_service(state: &AppState) -> BoardServiceImpl<PgBoardRepository, PgCategoryRepository> {
    BoardServiceImpl::new(
        Arc::new(PgBoardRepository::new(state.db.clone())),
        Arc::new(PgCategoryRepository::new(state.db.clone())),
    )
}

fn map_error(e: BoardError, raw_id: &str) -> AppError {
    match e {
        BoardError::NotFound => {
            AppError::NotFound(format!("Could not find board with ID {}.", raw_id))
        }
        BoardError::CategoryNotFound => AppError::NotFound(format!(
            "Could not find board category with ID {}.",
            raw_id
        )),
        // A missing creation target is malformed input, not a missing resource
        BoardError::MissingCategory => {
            AppError::Validation("Could not find a category for the provided ID.".into())
        }
        BoardError::TopicExists => AppError::Conflict("Board exists.".into()),
        BoardError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List all boards
pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<Board>>, AppError> {
    let boards = board_service(&state)
        .list_boards()
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok(Json(boards))
}

/// Get a board by ID
pub async fn get_board(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Board>, AppError> {
    let board_id = parse_id("board", &raw_id)?;

    let board = board_service(&state)
        .get_board(board_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(board))
}

/// List the boards belonging to a category
pub async fn list_boards_by_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Board>>, AppError> {
    let category_id = parse_id("board category", &raw_id)?;

    let boards = board_service(&state)
        .list_boards_by_category(category_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(boards))
}

/// Create a new board
pub async fn create_board(
    State(state): State<AppState>,
    Json(body): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), AppError> {
    body.validate().map_err(validation_error)?;

    let board = board_service(&state)
        .create_board(CreateBoardDto {
            topic: body.topic,
            description: body.description,
            category_id: body.category_id,
        })
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok((StatusCode::CREATED, Json(board)))
}

/// Update a board, possibly moving it to another category
pub async fn update_board(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateBoardRequest>,
) -> Result<Json<Board>, AppError> {
    let board_id = parse_id("board", &raw_id)?;
    body.validate().map_err(validation_error)?;

    let board = board_service(&state)
        .update_board(
            board_id,
            UpdateBoardDto {
                topic: body.topic,
                description: body.description,
                category_id: body.category_id,
            },
        )
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(board))
}

/// Delete a board
pub async fn delete_board(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let board_id = parse_id("board", &raw_id)?;

    board_service(&state)
        .delete_board(board_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(MessageResponse::new("Deleted board.")))
}
