//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError
///
/// Picks the first field error as the response message, mirroring the
/// one-message-per-response error shape of the API.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".into());
                format!("{}: {}", field, detail)
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid inputs passed.".into());

    AppError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct PasswordInput {
        #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
        password: String,
    }

    #[test]
    fn test_validation_error_uses_field_message() {
        let input = PasswordInput {
            password: "short".into(),
        };
        let errors = input.validate().unwrap_err();

        match validation_error(errors) {
            AppError::Validation(msg) => {
                assert!(msg.contains("password"));
                assert!(msg.contains("at least 8"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }
}
