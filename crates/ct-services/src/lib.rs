//! # ct-services
//!
//! Business logic for the contacts API.
//!
//! Every operation runs in the same order: the contract checks and
//! normalizes the input, ownership is resolved against the authenticated
//! user, then one scoped store call does the work.

pub mod error;
pub mod ownership;
pub mod contacts;
pub mod addresses;
pub mod users;

pub use ownership::OwnershipResolver;
pub use contacts::ContactService;
pub use addresses::AddressService;
pub use users::UserService;

use ct_core::config::PagingConfig;
use ct_db::Stores;

/// All services, sharing one set of stores
#[derive(Clone)]
pub struct Services {
    pub contacts: ContactService,
    pub addresses: AddressService,
    pub users: UserService,
}

impl Services {
    pub fn new(stores: Stores, paging: PagingConfig) -> Self {
        let resolver = OwnershipResolver::new(stores.contacts.clone(), stores.addresses.clone());
        Self {
            contacts: ContactService::new(stores.contacts, resolver.clone(), paging),
            addresses: AddressService::new(stores.addresses, resolver),
            users: UserService::new(stores.users),
        }
    }
}
