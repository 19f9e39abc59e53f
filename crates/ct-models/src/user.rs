//! User account models
//!
//! Table: users

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterParams {
    #[validate(required, length(min = 1, max = 100))]
    pub username: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub password: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,
}

impl RegisterParams {
    pub const FIELDS: &'static [&'static str] = &["username", "password", "name"];
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginParams {
    #[validate(required, length(min = 1, max = 100))]
    pub username: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub password: Option<String>,
}

impl LoginParams {
    pub const FIELDS: &'static [&'static str] = &["username", "password"];
}

/// Partial update of the current user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserParams {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub password: Option<String>,
}

impl UpdateUserParams {
    pub const FIELDS: &'static [&'static str] = &["name", "password"];
}

/// A validated registration. `password` is still plain text here; the
/// service hashes it before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none()
    }
}
