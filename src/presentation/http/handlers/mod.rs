//! Request Handlers

pub mod auth;
pub mod board;
pub mod category;
pub mod health;
pub mod post;
pub mod thread;
pub mod user;

use uuid::Uuid;

use crate::shared::error::AppError;

/// Parse a path segment as a document ID.
///
/// An unparseable ID cannot match any stored document, so it reports as a
/// missing document rather than a malformed request.
pub(crate) fn parse_id(kind: &str, raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Could not find {} with ID {}.", kind, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::now_v7();
        assert_eq!(parse_id("board", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_id_reports_garbage_as_missing() {
        match parse_id("board", "not-a-uuid") {
            Err(AppError::NotFound(msg)) => {
                assert_eq!(msg, "Could not find board with ID not-a-uuid.");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
