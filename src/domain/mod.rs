//! Domain Layer
//!
//! Core business entities and repository traits.

pub mod entities;

pub use entities::board::{Board, BoardRepository};
pub use entities::category::{BoardCategory, CategoryRepository};
pub use entities::post::{Post, PostRepository};
pub use entities::thread::{Thread, ThreadRepository};
pub use entities::user::{User, UserRepository};
