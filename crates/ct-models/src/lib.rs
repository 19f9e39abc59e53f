//! # ct-models
//!
//! Write models for the contacts API.
//!
//! Each `*Params` struct is the raw shape of a request payload: every field is
//! optional so a missing key reaches validation instead of failing to decode.
//! The declarative rules live on the fields as `validator` attributes. The
//! normalized values (`ContactData`, `AddressData`, ...) are what contracts hand
//! to services once validation has passed.

pub use ct_core::traits::Id;

pub mod contact;
pub mod address;
pub mod user;

pub use contact::{ContactData, ContactFilter, ContactParams, ContactSearch, SearchParams};
pub use address::{AddressData, AddressParams};
pub use user::{Credentials, LoginParams, NewUser, RegisterParams, UpdateUserParams, UserChanges};
