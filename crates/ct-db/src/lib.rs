//! # ct-db
//!
//! Persistence layer for the contacts API.
//!
//! - Connection pool management and migrations
//! - Store traits every backend implements (`ContactStore`, `AddressStore`,
//!   `UserStore`)
//! - PostgreSQL repositories built on SQLx
//! - `MemoryStore`, an in-process backend for tests and for running without
//!   a database
//!
//! Every contact and address query carries the owner predicate, so a record
//! belonging to someone else looks exactly like a missing one.
//!
//! ## Example
//!
//! ```ignore
//! use ct_db::{Database, Stores};
//!
//! let db = Database::connect(&config.database).await?;
//! let stores = Stores::postgres(&db);
//! let contact = stores.contacts.find(user_id, 1).await?;
//! ```

pub mod pool;
pub mod repository;
pub mod contacts;
pub mod addresses;
pub mod users;
pub mod memory;

// Re-exports
pub use pool::{Database, PoolStats};
pub use repository::{
    AddressRow, AddressStore, ContactRow, ContactStore, RepositoryError, RepositoryResult,
    Stores, UserRow, UserStore,
};
pub use contacts::ContactRepository;
pub use addresses::AddressRepository;
pub use users::UserRepository;
pub use memory::MemoryStore;
