//! # ct-auth
//!
//! Authentication for the contacts API.
//!
//! ## Features
//!
//! - Opaque token authentication from the `Authorization` header
//! - Argon2 password hashing
//! - Login token generation

pub mod current_user;
pub mod middleware;
pub mod password;
pub mod token;

pub use current_user::CurrentUser;
pub use middleware::{AuthError, AuthResult, Authenticator, RequestHeaders, TokenResolver};
pub use password::{hash_password, verify_password};
pub use token::generate_token;
