//! Domain Entities
//!
//! One module per forum entity. Each defines the entity struct and the
//! repository trait its storage implementation must satisfy.

pub mod board;
pub mod category;
pub mod post;
pub mod thread;
pub mod user;
