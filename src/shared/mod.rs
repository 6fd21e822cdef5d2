//! Shared Utilities
//!
//! Common error types and validation helpers.

pub mod error;
pub mod validation;

pub use error::{AppError, ErrorResponse};
