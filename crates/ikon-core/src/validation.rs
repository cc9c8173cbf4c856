//! Validation utilities.

use crate::{FieldError, IkonError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `IkonError` on failure.
    fn validate_request(&self) -> Result<(), IkonError> {
        self.validate().map_err(validation_errors_to_ikon_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect()
}

/// Converts `validator::ValidationErrors` to `IkonError`.
#[must_use]
pub fn validation_errors_to_ikon_error(errors: ValidationErrors) -> IkonError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    IkonError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a `#RRGGBB` colour string.
    pub fn hex_color(value: &str) -> Result<(), ValidationError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValidationError::new("hex_color"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(min = 0))]
        score: i64,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(hex_color("#FDBCB4").is_ok());
        assert!(hex_color("#8b4513").is_ok());
        assert!(hex_color("FDBCB4").is_err());
        assert!(hex_color("#FDBCBZ").is_err());
        assert!(hex_color("#FFF").is_err());
    }

    #[test]
    fn test_validate_request_maps_to_validation_error() {
        let err = Sample { score: -1 }.validate_request().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("score"));
        assert!(Sample { score: 10 }.validate_request().is_ok());
    }
}
