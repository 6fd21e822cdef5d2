//! Repository Implementations
//!
//! PostgreSQL-backed implementations of the domain repository traits.

pub mod board_repository;
pub mod category_repository;
pub mod post_repository;
pub mod thread_repository;
pub mod user_repository;

pub use board_repository::PgBoardRepository;
pub use category_repository::PgCategoryRepository;
pub use post_repository::PgPostRepository;
pub use thread_repository::PgThreadRepository;
pub use user_repository::PgUserRepository;
