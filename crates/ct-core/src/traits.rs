//! Core traits shared by services and the authentication layer

/// Primary key type
pub type Id = i64;

/// The authenticated principal a request runs as.
///
/// Every contact and address lookup is scoped by `user_id()`.
pub trait UserContext: Send + Sync {
    fn user_id(&self) -> Id;
    fn username(&self) -> &str;
}
