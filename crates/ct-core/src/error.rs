//! Core error types for the contacts API
//!
//! `CtError` is what services return; the HTTP layer maps it to a status code
//! through `status_code()`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Core error type for all contacts operations
#[derive(Error, Debug)]
pub enum CtError {
    /// The record is absent, or it exists but is not visible to the caller.
    /// Both cases carry the same message.
    #[error("{entity} is not found")]
    NotFound { entity: &'static str },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A client error that is not tied to one field
    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CtError {
    pub fn not_found(entity: &'static str) -> Self {
        CtError::NotFound { entity }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        CtError::Unauthorized {
            message: message.into(),
        }
    }

    /// Shortcut for a single-field validation failure
    pub fn invalid(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, rule, message);
        CtError::Validation(errors)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            CtError::NotFound { .. } => 404,
            CtError::Unauthorized { .. } => 401,
            CtError::Validation(_) | CtError::BadRequest(_) => 400,
            CtError::Database(_) | CtError::Internal(_) => 500,
        }
    }
}

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    /// Name of the rule that failed (`required`, `length`, `email`, ...)
    pub rule: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Ordered collection of field errors.
///
/// Errors keep the order they were added in, so a schema that checks fields
/// in declaration order reports them in that order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
