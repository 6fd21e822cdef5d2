//! Thread Service
//!
//! Thread lifecycle within boards.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BoardRepository, Thread, ThreadRepository, UserRepository};

/// Default page size for board thread listings.
pub const DEFAULT_THREAD_LIMIT: i64 = 20;

/// Thread service trait
#[async_trait]
pub trait ThreadService: Send + Sync {
    /// List all threads
    async fn list_threads(&self) -> Result<Vec<Thread>, ThreadError>;

    /// Get thread by ID
    async fn get_thread(&self, thread_id: Uuid) -> Result<Thread, ThreadError>;

    /// List the most recent threads in a board
    async fn list_threads_by_board(
        &self,
        board_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Thread>, ThreadError>;

    /// List threads authored by a user, newest first
    async fn list_threads_by_author(&self, author_id: Uuid) -> Result<Vec<Thread>, ThreadError>;

    /// Open a new thread in a board
    async fn create_thread(&self, request: CreateThreadDto) -> Result<Thread, ThreadError>;

    /// Rename a thread
    async fn update_thread(&self, thread_id: Uuid, topic: String) -> Result<Thread, ThreadError>;

    /// Delete a thread
    async fn delete_thread(&self, thread_id: Uuid) -> Result<(), ThreadError>;
}

/// Create thread request
#[derive(Debug, Clone)]
pub struct CreateThreadDto {
    pub author_id: Uuid,
    pub board_id: Uuid,
    pub topic: String,
}

/// Thread service errors
#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    #[error("Thread not found")]
    NotFound,

    #[error("Board not found")]
    BoardNotFound,

    #[error("User not found")]
    UserNotFound,

    /// Creation referenced a board that does not exist. Reported as a bad
    /// request rather than a missing resource.
    #[error("Board does not exist")]
    MissingBoard,

    /// Creation referenced an author that does not exist.
    #[error("Author does not exist")]
    MissingAuthor,

    /// A listing asked for fewer than one thread.
    #[error("Limit must be at least 1")]
    InvalidLimit,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// ThreadService implementation
pub struct ThreadServiceImpl<T, B, U>
where
    T: ThreadRepository,
    B: BoardRepository,
    U: UserRepository,
{
    thread_repo: Arc<T>,
    board_repo: Arc<B>,
    user_repo: Arc<U>,
}

impl<T, B, U> ThreadServiceImpl<T, B, U>
where
    T: ThreadRepository,
    B: BoardRepository,
    U: UserRepository,
{
    pub fn new(thread_repo: Arc<T>, board_repo: Arc<B>, user_repo: Arc<U>) -> Self {
        Self {
            thread_repo,
            board_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl<T, B, U> ThreadService for ThreadServiceImpl<T, B, U>
where
    T: ThreadRepository + 'static,
    B: BoardRepository + 'static,
    U: UserRepository + 'static,
{
    async fn list_threads(&self) -> Result<Vec<Thread>, ThreadError> {
        self.thread_repo
            .find_all()
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))
    }

    async fn get_thread(&self, thread_id: Uuid) -> Result<Thread, ThreadError> {
        self.thread_repo
            .find_by_id(thread_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?
            .ok_or(ThreadError::NotFound)
    }

    async fn list_threads_by_board(
        &self,
        board_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Thread>, ThreadError> {
        let board = self
            .board_repo
            .find_by_id(board_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?;
        if board.is_none() {
            return Err(ThreadError::BoardNotFound);
        }

        let limit = limit.unwrap_or(DEFAULT_THREAD_LIMIT);
        if limit < 1 {
            return Err(ThreadError::InvalidLimit);
        }

        self.thread_repo
            .find_by_board(board_id, limit)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))
    }

    async fn list_threads_by_author(&self, author_id: Uuid) -> Result<Vec<Thread>, ThreadError> {
        if self
            .user_repo
            .find_by_id(author_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(ThreadError::UserNotFound);
        }

        self.thread_repo
            .find_by_author(author_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))
    }

    async fn create_thread(&self, request: CreateThreadDto) -> Result<Thread, ThreadError> {
        // Both parents must exist before any back-reference set is touched
        if self
            .board_repo
            .find_by_id(request.board_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(ThreadError::MissingBoard);
        }

        if self
            .user_repo
            .find_by_id(request.author_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?
            .is_none()
        {
            return Err(ThreadError::MissingAuthor);
        }

        let thread = Thread {
            id: Uuid::now_v7(),
            author_id: request.author_id,
            board_id: request.board_id,
            topic: request.topic,
            created_at: Utc::now(),
            posts: Vec::new(),
            last_post: None,
        };

        let created = self
            .thread_repo
            .create(&thread)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?;

        tracing::info!(topic = %created.topic, board_id = %created.board_id, "Created new thread");

        Ok(created)
    }

    async fn update_thread(&self, thread_id: Uuid, topic: String) -> Result<Thread, ThreadError> {
        let thread = self
            .thread_repo
            .find_by_id(thread_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?
            .ok_or(ThreadError::NotFound)?;

        self.thread_repo
            .update_topic(thread.id, &topic)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))
    }

    async fn delete_thread(&self, thread_id: Uuid) -> Result<(), ThreadError> {
        let thread = self
            .thread_repo
            .find_by_id(thread_id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))?
            .ok_or(ThreadError::NotFound)?;

        // TODO: cascade-delete the thread's posts; their thread references
        // currently dangle after this.
        self.thread_repo
            .delete(thread.id)
            .await
            .map_err(|e| ThreadError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use chrono::Duration;

    use crate::domain::{Board, User};
    use crate::shared::error::AppError;

    /// In-memory stand-in for the Postgres thread repository. Records the
    /// limit passed to each board listing.
    #[derive(Default)]
    struct InMemoryThreadRepo {
        threads: Mutex<Vec<Thread>>,
        board_queries: Mutex<Vec<(Uuid, i64)>>,
    }

    #[async_trait]
    impl ThreadRepository for InMemoryThreadRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>, AppError> {
            Ok(self.threads.lock().unwrap().iter().find(|t| t.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Thread>, AppError> {
            Ok(self.threads.lock().unwrap().clone())
        }

        async fn find_by_board(&self, board_id: Uuid, limit: i64) -> Result<Vec<Thread>, AppError> {
            self.board_queries.lock().unwrap().push((board_id, limit));

            let mut threads: Vec<Thread> = self
                .threads
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.board_id == board_id)
                .cloned()
                .collect();
            threads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            threads.truncate(limit as usize);
            Ok(threads)
        }

        async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Thread>, AppError> {
            Ok(self
                .threads
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.author_id == author_id)
                .cloned()
                .collect())
        }

        async fn create(&self, thread: &Thread) -> Result<Thread, AppError> {
            self.threads.lock().unwrap().push(thread.clone());
            Ok(thread.clone())
        }

        async fn update_topic(&self, id: Uuid, topic: &str) -> Result<Thread, AppError> {
            let mut threads = self.threads.lock().unwrap();
            let stored = threads
                .iter_mut()
                .find(|t| t.id == id)
                .expect("updating a thread that was never stored");
            stored.topic = topic.to_string();
            Ok(stored.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), AppError> {
            self.threads.lock().unwrap().retain(|t| t.id != id);
            Ok(())
        }
    }

    /// Board lookup backed by a fixed set of known IDs.
    struct KnownBoards {
        ids: Vec<Uuid>,
    }

    #[async_trait]
    impl BoardRepository for KnownBoards {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>, AppError> {
            Ok(self.ids.contains(&id).then(|| Board {
                id,
                ..Default::default()
            }))
        }

        async fn find_all(&self) -> Result<Vec<Board>, AppError> {
            Ok(Vec::new())
        }

        async fn find_by_category(&self, _category_id: Uuid) -> Result<Vec<Board>, AppError> {
            Ok(Vec::new())
        }

        async fn topic_exists(&self, _topic: &str) -> Result<bool, AppError> {
            Ok(false)
        }

        async fn create(&self, board: &Board) -> Result<Board, AppError> {
            Ok(board.clone())
        }

        async fn update(&self, board: &Board) -> Result<Board, AppError> {
            Ok(board.clone())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
            Ok(())
        }
    }

    /// User lookup backed by a fixed set of known IDs.
    struct KnownUsers {
        ids: Vec<Uuid>,
    }

    #[async_trait]
    impl UserRepository for KnownUsers {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
            Ok(self.ids.contains(&id).then(|| User {
                id,
                ..Default::default()
            }))
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Vec<User>, AppError> {
            Ok(Vec::new())
        }

        async fn create(&self, user: &User) -> Result<User, AppError> {
            Ok(user.clone())
        }

        async fn update(&self, user: &User) -> Result<User, AppError> {
            Ok(user.clone())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), AppError> {
            Ok(())
        }

        async fn email_exists(&self, _email: &str) -> Result<bool, AppError> {
            Ok(false)
        }

        async fn username_exists(&self, _username: &str) -> Result<bool, AppError> {
            Ok(false)
        }
    }

    type TestService = ThreadServiceImpl<InMemoryThreadRepo, KnownBoards, KnownUsers>;

    fn service_with(
        threads: Vec<Thread>,
        board_ids: Vec<Uuid>,
        user_ids: Vec<Uuid>,
    ) -> (TestService, Arc<InMemoryThreadRepo>) {
        let thread_repo = Arc::new(InMemoryThreadRepo {
            threads: Mutex::new(threads),
            board_queries: Mutex::new(Vec::new()),
        });
        let service = ThreadServiceImpl::new(
            Arc::clone(&thread_repo),
            Arc::new(KnownBoards { ids: board_ids }),
            Arc::new(KnownUsers { ids: user_ids }),
        );
        (service, thread_repo)
    }

    fn thread_in(board_id: Uuid, minutes_ago: i64) -> Thread {
        Thread {
            id: Uuid::now_v7(),
            board_id,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_thread_requires_existing_board() {
        let author_id = Uuid::now_v7();
        let (service, _) = service_with(Vec::new(), Vec::new(), vec![author_id]);

        let err = service
            .create_thread(CreateThreadDto {
                author_id,
                board_id: Uuid::now_v7(),
                topic: "First".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ThreadError::MissingBoard));
    }

    #[tokio::test]
    async fn test_create_thread_requires_existing_author() {
        let board_id = Uuid::now_v7();
        let (service, _) = service_with(Vec::new(), vec![board_id], Vec::new());

        let err = service
            .create_thread(CreateThreadDto {
                author_id: Uuid::now_v7(),
                board_id,
                topic: "First".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ThreadError::MissingAuthor));
    }

    #[tokio::test]
    async fn test_create_thread_stores_thread_when_parents_exist() {
        let board_id = Uuid::now_v7();
        let author_id = Uuid::now_v7();
        let (service, thread_repo) = service_with(Vec::new(), vec![board_id], vec![author_id]);

        let created = service
            .create_thread(CreateThreadDto {
                author_id,
                board_id,
                topic: "First".into(),
            })
            .await
            .expect("create");

        let stored = thread_repo.find_by_id(created.id).await.expect("lookup");
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_board_listing_defaults_to_twenty_newest() {
        let board_id = Uuid::now_v7();
        let threads = (0..25).map(|i| thread_in(board_id, i)).collect();
        let (service, thread_repo) = service_with(threads, vec![board_id], Vec::new());

        let listed = service
            .list_threads_by_board(board_id, None)
            .await
            .expect("list");

        assert_eq!(listed.len(), DEFAULT_THREAD_LIMIT as usize);
        // Newest first: the thread created zero minutes ago leads
        assert!(listed[0].created_at > listed[1].created_at);
        assert_eq!(
            *thread_repo.board_queries.lock().unwrap(),
            vec![(board_id, DEFAULT_THREAD_LIMIT)]
        );
    }

    #[tokio::test]
    async fn test_board_listing_honors_explicit_limit() {
        let board_id = Uuid::now_v7();
        let threads = (0..25).map(|i| thread_in(board_id, i)).collect();
        let (service, thread_repo) = service_with(threads, vec![board_id], Vec::new());

        let listed = service
            .list_threads_by_board(board_id, Some(5))
            .await
            .expect("list");

        assert_eq!(listed.len(), 5);
        assert_eq!(
            *thread_repo.board_queries.lock().unwrap(),
            vec![(board_id, 5)]
        );
    }

    #[tokio::test]
    async fn test_board_listing_rejects_non_positive_limit() {
        let board_id = Uuid::now_v7();
        let (service, thread_repo) = service_with(Vec::new(), vec![board_id], Vec::new());

        let err = service
            .list_threads_by_board(board_id, Some(0))
            .await
            .unwrap_err();

        assert!(matches!(err, ThreadError::InvalidLimit));
        // The repository is never asked for a non-positive page
        assert!(thread_repo.board_queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_board_listing_requires_existing_board() {
        let (service, _) = service_with(Vec::new(), Vec::new(), Vec::new());

        let err = service
            .list_threads_by_board(Uuid::now_v7(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ThreadError::BoardNotFound));
    }
}
