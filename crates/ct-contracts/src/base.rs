//! Base contract system

use ct_core::error::ValidationErrors;
use validator::{Validate, ValidationError};

/// Result of a contract that only checks
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Normalized value handed to the service on success
    type Output;

    /// Check the input and normalize it, reporting every violation found
    fn validate(&self, input: T) -> Result<Self::Output, ValidationErrors>;
}

/// Run the field rules declared on `input` and collect the violations.
///
/// `fields` fixes the order errors are reported in; it should list the
/// fields in declaration order.
pub fn check_fields<T: Validate>(input: &T, fields: &[&'static str]) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    if let Err(failures) = input.validate() {
        let by_field = failures.field_errors();
        for field in fields {
            if let Some(list) = by_field.get(field) {
                for failure in list.iter() {
                    errors.add(*field, failure.code.to_string(), describe(failure));
                }
            }
        }
    }
    errors.into_result()
}

/// Error for a field the rules marked required but that came through empty
pub fn required(field: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, "required", "is required");
    errors
}

fn describe(failure: &ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }

    let param = |name: &str| {
        failure
            .params
            .get(name)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
    };

    match failure.code.as_ref() {
        "required" => "is required".to_string(),
        "email" => "must be a valid email".to_string(),
        "length" => {
            let actual = failure
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .map(|s| s.chars().count() as i64);
            match (param("min"), param("max"), actual) {
                (Some(1), _, Some(0)) => "must not be empty".to_string(),
                (Some(min), _, Some(len)) if len < min => {
                    format!("length must be at least {min} characters")
                }
                (_, Some(max), _) => format!("length must be at most {max} characters"),
                (Some(min), None, _) => format!("length must be at least {min} characters"),
                _ => "has an invalid length".to_string(),
            }
        }
        "range" => match (param("min"), param("max"), failure.params.get("value")) {
            (Some(min), _, Some(v)) if v.as_f64().map_or(false, |v| v < min as f64) => {
                format!("must be at least {min}")
            }
            (_, Some(max), _) => format!("must be at most {max}"),
            (Some(min), None, _) => format!("must be at least {min}"),
            _ => "is out of range".to_string(),
        },
        _ => "is invalid".to_string(),
    }
}
