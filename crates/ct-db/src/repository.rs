//! Store traits, row types and the repository error
//!
//! Each trait is implemented twice: by the PostgreSQL repositories in this
//! crate and by `MemoryStore`. Contact and address methods take the owning
//! user's id and apply it in the same lookup as the record id.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ct_core::pagination::PageRequest;
use ct_core::traits::Id;
use ct_models::{AddressData, ContactData, ContactFilter};
use sqlx::FromRow;

use crate::{AddressRepository, ContactRepository, Database, MemoryStore, UserRepository};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Contact row from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ContactRow {
    pub id: Id,
    pub user_id: Id,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address row from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AddressRow {
    pub id: Id,
    pub contact_id: Id,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: Id,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, user_id: Id, data: &ContactData) -> RepositoryResult<ContactRow>;

    async fn find(&self, user_id: Id, id: Id) -> RepositoryResult<Option<ContactRow>>;

    /// Overwrite every field; `None` when the contact is not the user's
    async fn replace(
        &self,
        user_id: Id,
        id: Id,
        data: &ContactData,
    ) -> RepositoryResult<Option<ContactRow>>;

    /// Delete the contact and its addresses; `false` when nothing matched
    async fn delete(&self, user_id: Id, id: Id) -> RepositoryResult<bool>;

    /// One page of matches ordered by id, plus the total match count
    async fn search(
        &self,
        user_id: Id,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> RepositoryResult<(Vec<ContactRow>, i64)>;
}

#[async_trait]
pub trait AddressStore: Send + Sync {
    /// `None` when the contact is not the user's
    async fn insert(
        &self,
        user_id: Id,
        contact_id: Id,
        data: &AddressData,
    ) -> RepositoryResult<Option<AddressRow>>;

    async fn find(
        &self,
        user_id: Id,
        contact_id: Id,
        id: Id,
    ) -> RepositoryResult<Option<AddressRow>>;

    async fn replace(
        &self,
        user_id: Id,
        contact_id: Id,
        id: Id,
        data: &AddressData,
    ) -> RepositoryResult<Option<AddressRow>>;

    async fn delete(&self, user_id: Id, contact_id: Id, id: Id) -> RepositoryResult<bool>;

    /// Every address of the contact ordered by id; `None` when the contact
    /// is not the user's
    async fn list(&self, user_id: Id, contact_id: Id) -> RepositoryResult<Option<Vec<AddressRow>>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is taken
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> RepositoryResult<UserRow>;

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<UserRow>>;

    async fn find_by_token(&self, token: &str) -> RepositoryResult<Option<UserRow>>;

    /// Change the fields that are `Some`
    async fn update_profile(
        &self,
        id: Id,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> RepositoryResult<Option<UserRow>>;

    async fn set_token(&self, id: Id, token: Option<&str>) -> RepositoryResult<bool>;
}

/// The three stores a running service needs, behind trait objects
#[derive(Clone)]
pub struct Stores {
    pub contacts: Arc<dyn ContactStore>,
    pub addresses: Arc<dyn AddressStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    pub fn postgres(db: &Database) -> Self {
        let pool = db.pool().clone();
        Self {
            contacts: Arc::new(ContactRepository::new(pool.clone())),
            addresses: Arc::new(AddressRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self {
            contacts: Arc::new(store.clone()),
            addresses: Arc::new(store.clone()),
            users: Arc::new(store),
        }
    }
}
