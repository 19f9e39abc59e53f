//! # ct-contracts
//!
//! Contracts check request input before a service touches storage.
//!
//! A contract runs the declarative field rules of its params type, reports
//! every violation at once, and on success hands back the normalized value
//! the service works with.

pub mod base;
pub mod contacts;
pub mod addresses;
pub mod search;
pub mod users;

pub use base::*;
pub use contacts::ContactContract;
pub use addresses::AddressContract;
pub use search::SearchContract;
pub use users::{LoginContract, RegisterContract, UpdateUserContract};
