//! Board Category Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::application::dto::response::MessageResponse;
use crate::application::services::{
    CategoryError, CategoryService, CategoryServiceImpl, CreateCategoryDto, UpdateCategoryDto,
};
use crate::domain::BoardCategory;
use crate::infrastructure::repositories::PgCategoryRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

use super::parse_id;

fn category_service(state: &AppState) -> CategoryServiceImpl<PgCategoryRepository> {
    CategoryServiceImpl::new(Arc::new(PgCategoryRepository::new(state.db.clone())))
}

fn map_error(e: CategoryError, raw_id: &str) -> AppError {
    match e {
        CategoryError::NotFound => AppError::NotFound(format!(
            "Could not find board category with ID {}.",
            raw_id
        )),
        CategoryError::TopicExists => AppError::Conflict("Category exists.".into()),
        CategoryError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List all board categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardCategory>>, AppError> {
    let categories = category_service(&state)
        .list_categories()
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok(Json(categories))
}

/// Get a board category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<BoardCategory>, AppError> {
    let category_id = parse_id("board category", &raw_id)?;

    let category = category_service(&state)
        .get_category(category_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(category))
}

/// Create a new board category
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<BoardCategory>), AppError> {
    body.validate().map_err(validation_error)?;

    let category = category_service(&state)
        .create_category(CreateCategoryDto {
            topic: body.topic,
            sort_order: body.sort_order,
        })
        .await
        .map_err(|e| map_error(e, ""))?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a board category
pub async fn update_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<BoardCategory>, AppError> {
    let category_id = parse_id("board category", &raw_id)?;
    body.validate().map_err(validation_error)?;

    let category = category_service(&state)
        .update_category(
            category_id,
            UpdateCategoryDto {
                topic: body.topic,
                sort_order: body.sort_order,
            },
        )
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(category))
}

/// Delete a board category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let category_id = parse_id("board category", &raw_id)?;

    category_service(&state)
        .delete_category(category_id)
        .await
        .map_err(|e| map_error(e, &raw_id))?;

    Ok(Json(MessageResponse::new("Deleted board category.")))
}
