//! # ct-api
//!
//! REST handlers for the contacts API.
//!
//! Successful responses are wrapped as `{"data": ...}` (with `paging` on
//! search results); failures as `{"errors": ...}`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::{AppState, AuthenticatedUser};
pub use routes::router;
