//! Mapping of storage failures into service errors

use ct_core::CtError;
use ct_db::RepositoryError;

/// Conflicts are the client's fault; anything else is logged and hidden
/// behind a generic database error.
pub(crate) fn storage_error(err: RepositoryError) -> CtError {
    match err {
        RepositoryError::Conflict(message) => CtError::BadRequest(message),
        other => {
            tracing::error!(error = %other, "Storage operation failed");
            CtError::Database(other.to_string())
        }
    }
}
