//! Login tokens

use uuid::Uuid;

/// A fresh opaque token (random UUID v4)
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}
