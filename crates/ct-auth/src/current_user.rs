//! The authenticated principal attached to a request

use ct_core::traits::{Id, UserContext};

/// Current user context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Id,
    pub username: String,
    pub name: String,
}

impl CurrentUser {
    pub fn new(id: Id, username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            name: name.into(),
        }
    }
}

impl UserContext for CurrentUser {
    fn user_id(&self) -> Id {
        self.id
    }

    fn username(&self) -> &str {
        &self.username
    }
}
