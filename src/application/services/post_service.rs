//! Post Service
//!
//! Post lifecycle within threads.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Post, PostRepository, ThreadRepository, UserRepository};

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// List all posts
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Get post by ID
    async fn get_post(&self, post_id: Uuid) -> Result<Post, PostError>;

    /// List posts in a thread, oldest first
    async fn list_posts_by_thread(&self, thread_id: Uuid) -> Result<Vec<Post>, PostError>;

    /// List posts authored by a user, newest first
    async fn list_posts_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, PostError>;

    /// Add a post to a thread
    async fn create_post(&self, request: CreatePostDto) -> Result<Post, PostError>;

    /// Edit a post's content
    async fn update_post(&self, post_id: Uuid, content: String) -> Result<Post, PostError>;

    /// Delete a post
    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostError>;
}

/// Create post request
#[derive(Debug, Clone)]
pub struct CreatePostDto {
    pub author_id: Uuid,
    pub thread_id: Uuid,
    pub content: String,
}

/// Post service errors
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("Post not found")]
    NotFound,

    #[error("Thread not found")]
    ThreadNotFound,

    #[error("Author not found")]
    AuthorNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// PostService implementation
pub struct PostServiceImpl<P, T, U>
where
    P: PostRepository,
    T: ThreadRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    thread_repo: Arc<T>,
    user_repo: Arc<U>,
}

impl<P, T, U> PostServiceImpl<P, T, U>
where
    P: PostRepository,
    T: ThreadRepository,
    U: UserRepository,
{
    pub fn new(post_repo: Arc<P>, thread_repo: Arc<T>, user_repo: Arc<U>) -> Self {
        Self {
            post_repo,
            thread_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl<P, T, U> PostService for PostServiceImpl<P, T, U>
where
    P: PostRepository + 'static,
    T: ThreadRepository + 'static,
    U: UserRepository + 'static,
{
    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.post_repo
            .find_all()
            .await
            .map_err(|e| PostError::Internal(e.to_string()))
    }

    async fn get_post(&self, post_id: Uuid) -> Result<Post, PostError> {
        self.post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .ok_or(PostError::NotFound)
    }

    async fn list_posts_by_thread(&self, thread_id: Uuid) -> Result<Vec<Post>, PostError> {
        if self
            .thread_repo
            .find_by_id(thread_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(PostError::ThreadNotFound);
        }

        self.post_repo
            .find_by_thread(thread_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))
    }

    async fn list_posts_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, PostError> {
        if self
            .user_repo
            .find_by_id(author_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(PostError::AuthorNotFound);
        }

        self.post_repo
            .find_by_author(author_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))
    }

    async fn create_post(&self, request: CreatePostDto) -> Result<Post, PostError> {
        // Both parents must exist before any back-reference set is touched
        if self
            .thread_repo
            .find_by_id(request.thread_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(PostError::ThreadNotFound);
        }

        if self
            .user_repo
            .find_by_id(request.author_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(PostError::AuthorNotFound);
        }

        let post = Post {
            id: Uuid::now_v7(),
            author_id: request.author_id,
            thread_id: request.thread_id,
            created_at: Utc::now(),
            content: request.content,
        };

        let created = self
            .post_repo
            .create(&post)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?;

        tracing::debug!(post_id = %created.id, thread_id = %created.thread_id, "Created new post");

        Ok(created)
    }

    async fn update_post(&self, post_id: Uuid, content: String) -> Result<Post, PostError> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .ok_or(PostError::NotFound)?;

        self.post_repo
            .update_content(post.id, &content)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostError> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .ok_or(PostError::NotFound)?;

        self.post_repo
            .delete(post.id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))
    }
}
