//! Ownership resolution
//!
//! A contact that belongs to another user and a contact that does not exist
//! produce the same `NotFound`. The same holds for an address under the
//! wrong contact.

use std::sync::Arc;

use ct_core::traits::{Id, UserContext};
use ct_core::{CtError, CtResult};
use ct_db::{AddressRow, AddressStore, ContactRow, ContactStore};

use crate::error::storage_error;

#[derive(Clone)]
pub struct OwnershipResolver {
    contacts: Arc<dyn ContactStore>,
    addresses: Arc<dyn AddressStore>,
}

impl OwnershipResolver {
    pub fn new(contacts: Arc<dyn ContactStore>, addresses: Arc<dyn AddressStore>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }

    /// The contact, if `user` owns it
    pub async fn resolve_contact<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
    ) -> CtResult<ContactRow> {
        self.contacts
            .find(user.user_id(), contact_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("contact"))
    }

    /// The address, if it sits under `contact_id` and `user` owns that contact
    pub async fn resolve_address<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
        address_id: Id,
    ) -> CtResult<AddressRow> {
        self.addresses
            .find(user.user_id(), contact_id, address_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("address"))
    }
}
