//! Result type alias

use crate::error::CtError;

/// Standard Result type for contacts operations
pub type CtResult<T> = Result<T, CtError>;
