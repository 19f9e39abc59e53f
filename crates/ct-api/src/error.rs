//! API error handling
//!
//! Every error leaves as `{"errors": ...}`: a list of field errors for
//! validation failures, a string otherwise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ct_core::error::{CtError, ValidationErrors};
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(ValidationErrors),
    Unauthorized(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CtError> for ApiError {
    fn from(err: CtError) -> Self {
        match err {
            CtError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CtError::Unauthorized { message } => ApiError::Unauthorized(message),
            CtError::Validation(errors) => ApiError::Validation(errors),
            CtError::BadRequest(message) => ApiError::BadRequest(message),
            CtError::Database(message) | CtError::Internal(message) => ApiError::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<T: Serialize> {
    errors: T,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(%errors, "Request failed validation");
                (status, Json(ErrorBody { errors })).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "Request failed");
                (
                    status,
                    Json(ErrorBody {
                        errors: "Internal server error",
                    }),
                )
                    .into_response()
            }
            ApiError::NotFound(msg) | ApiError::Unauthorized(msg) | ApiError::BadRequest(msg) => {
                (status, Json(ErrorBody { errors: msg })).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
