//! Application Services
//!
//! Business logic, one service per concern. Each service is a trait with a
//! generic implementation over the repository traits it depends on; handlers
//! construct implementations with concrete PostgreSQL repositories.

pub mod auth_service;
pub mod board_service;
pub mod category_service;
pub mod post_service;
pub mod thread_service;
pub mod user_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthToken, Claims};
pub use board_service::{BoardError, BoardService, BoardServiceImpl, CreateBoardDto, UpdateBoardDto};
pub use category_service::{
    CategoryError, CategoryService, CategoryServiceImpl, CreateCategoryDto, UpdateCategoryDto,
};
pub use post_service::{CreatePostDto, PostError, PostService, PostServiceImpl};
pub use thread_service::{CreateThreadDto, ThreadError, ThreadService, ThreadServiceImpl};
pub use user_service::{UpdateProfileDto, UserError, UserService, UserServiceImpl};
