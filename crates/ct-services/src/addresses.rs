//! Address service
//!
//! Every address operation is scoped through its parent contact.

use std::sync::Arc;

use ct_contracts::{AddressContract, Contract};
use ct_core::traits::{Id, UserContext};
use ct_core::{CtError, CtResult};
use ct_db::{AddressRow, AddressStore};
use ct_models::AddressParams;
use tracing::{debug, info};

use crate::error::storage_error;
use crate::ownership::OwnershipResolver;

#[derive(Clone)]
pub struct AddressService {
    addresses: Arc<dyn AddressStore>,
    resolver: OwnershipResolver,
}

impl AddressService {
    pub fn new(addresses: Arc<dyn AddressStore>, resolver: OwnershipResolver) -> Self {
        Self {
            addresses,
            resolver,
        }
    }

    pub async fn create<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
        params: AddressParams,
    ) -> CtResult<AddressRow> {
        let data = AddressContract.validate(params)?;

        let address = self
            .addresses
            .insert(user.user_id(), contact_id, &data)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("contact"))?;

        info!(
            user_id = user.user_id(),
            contact_id,
            address_id = address.id,
            "Address created"
        );
        Ok(address)
    }

    pub async fn get<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
        address_id: Id,
    ) -> CtResult<AddressRow> {
        debug!(user_id = user.user_id(), contact_id, address_id, "Fetching address");
        self.resolver
            .resolve_address(user, contact_id, address_id)
            .await
    }

    pub async fn update<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
        address_id: Id,
        params: AddressParams,
    ) -> CtResult<AddressRow> {
        let data = AddressContract.validate(params)?;

        let address = self
            .addresses
            .replace(user.user_id(), contact_id, address_id, &data)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("address"))?;

        info!(user_id = user.user_id(), contact_id, address_id, "Address updated");
        Ok(address)
    }

    pub async fn remove<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
        address_id: Id,
    ) -> CtResult<()> {
        let deleted = self
            .addresses
            .delete(user.user_id(), contact_id, address_id)
            .await
            .map_err(storage_error)?;

        if !deleted {
            return Err(CtError::not_found("address"));
        }

        info!(user_id = user.user_id(), contact_id, address_id, "Address removed");
        Ok(())
    }

    /// All addresses of the contact, ordered by id
    pub async fn list<U: UserContext>(&self, user: &U, contact_id: Id) -> CtResult<Vec<AddressRow>> {
        self.addresses
            .list(user.user_id(), contact_id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("contact"))
    }
}
