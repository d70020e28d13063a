//! Validation Utilities

use validator::ValidationErrors;

use super::error::{AppError, FieldError};

/// Flatten `validator` errors into a sorted list of field errors.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    // HashMap iteration order is not stable
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    AppError::Validation(field_errors(&errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
        password: String,
    }

    #[test]
    fn test_field_errors_are_sorted_and_carry_messages() {
        let probe = Probe {
            email: "nope".into(),
            password: "short".into(),
        };
        let errors = probe.validate().unwrap_err();
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "email");
        assert_eq!(fields[0].message, "Invalid email format");
        assert_eq!(fields[1].field, "password");
    }

    #[test]
    fn test_validation_error_wraps_fields() {
        let probe = Probe {
            email: "a@b.io".into(),
            password: "short".into(),
        };
        let err = validation_error(probe.validate().unwrap_err());
        assert!(matches!(err, AppError::Validation(ref f) if f.len() == 1));
    }
}
