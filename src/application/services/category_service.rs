//! Board Category Service
//!
//! Category management for the forum index.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BoardCategory, CategoryRepository};

/// Category service trait
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// List all categories in index order
    async fn list_categories(&self) -> Result<Vec<BoardCategory>, CategoryError>;

    /// Get category by ID
    async fn get_category(&self, category_id: Uuid) -> Result<BoardCategory, CategoryError>;

    /// Create a new category
    async fn create_category(&self, request: CreateCategoryDto) -> Result<BoardCategory, CategoryError>;

    /// Update a category's topic or sort order
    async fn update_category(
        &self,
        category_id: Uuid,
        update: UpdateCategoryDto,
    ) -> Result<BoardCategory, CategoryError>;

    /// Delete a category
    async fn delete_category(&self, category_id: Uuid) -> Result<(), CategoryError>;
}

/// Create category request
#[derive(Debug, Clone)]
pub struct CreateCategoryDto {
    pub topic: String,
    pub sort_order: i32,
}

/// Update category request
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub topic: Option<String>,
    pub sort_order: Option<i32>,
}

/// Category service errors
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("Category not found")]
    NotFound,

    #[error("Category exists")]
    TopicExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// CategoryService implementation
pub struct CategoryServiceImpl<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> CategoryServiceImpl<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }
}

#[async_trait]
impl<C> CategoryService for CategoryServiceImpl<C>
where
    C: CategoryRepository + 'static,
{
    async fn list_categories(&self) -> Result<Vec<BoardCategory>, CategoryError> {
        self.category_repo
            .find_all()
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))
    }

    async fn get_category(&self, category_id: Uuid) -> Result<BoardCategory, CategoryError> {
        self.category_repo
            .find_by_id(category_id)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))?
            .ok_or(CategoryError::NotFound)
    }

    async fn create_category(&self, request: CreateCategoryDto) -> Result<BoardCategory, CategoryError> {
        // Duplicate topic pre-check (case-insensitive)
        if self
            .category_repo
            .topic_exists(&request.topic)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))?
        {
            return Err(CategoryError::TopicExists);
        }

        let category = BoardCategory {
            id: Uuid::now_v7(),
            topic: request.topic,
            boards: Vec::new(),
            sort_order: request.sort_order,
        };

        let created = self
            .category_repo
            .create(&category)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))?;

        tracing::info!(topic = %created.topic, "Created new board category");

        Ok(created)
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        update: UpdateCategoryDto,
    ) -> Result<BoardCategory, CategoryError> {
        let mut category = self
            .category_repo
            .find_by_id(category_id)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))?
            .ok_or(CategoryError::NotFound)?;

        if let Some(topic) = update.topic {
            if !topic.eq_ignore_ascii_case(&category.topic)
                && self
                    .category_repo
                    .topic_exists(&topic)
                    .await
                    .map_err(|e| CategoryError::Internal(e.to_string()))?
            {
                return Err(CategoryError::TopicExists);
            }
            category.topic = topic;
        }

        if let Some(sort_order) = update.sort_order {
            category.sort_order = sort_order;
        }

        self.category_repo
            .update(&category)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<(), CategoryError> {
        let category = self
            .category_repo
            .find_by_id(category_id)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))?
            .ok_or(CategoryError::NotFound)?;

        // TODO: cascade-delete the category's boards (and their threads and
        // posts). Until then, boards under a deleted category are orphaned
        // and reachable only by direct ID.
        self.category_repo
            .delete(category.id)
            .await
            .map_err(|e| CategoryError::Internal(e.to_string()))
    }
}
