//! Contact service

use std::sync::Arc;

use ct_contracts::{Contract, ContactContract, SearchContract};
use ct_core::config::PagingConfig;
use ct_core::pagination::Page;
use ct_core::traits::{Id, UserContext};
use ct_core::{CtError, CtResult};
use ct_db::{ContactRow, ContactStore};
use ct_models::{ContactParams, SearchParams};
use tracing::{debug, info};

use crate::error::storage_error;
use crate::ownership::OwnershipResolver;

#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
    resolver: OwnershipResolver,
    search_contract: SearchContract,
}

impl ContactService {
    pub fn new(
        contacts: Arc<dyn ContactStore>,
        resolver: OwnershipResolver,
        paging: PagingConfig,
    ) -> Self {
        Self {
            contacts,
            resolver,
            search_contract: SearchContract::new(paging),
        }
    }

    pub async fn create<U: UserContext>(&self, user: &U, params: ContactParams) -> CtResult<ContactRow> {
        let data = ContactContract.validate(params)?;

        let contact = self
            .contacts
            .insert(user.user_id(), &data)
            .await
            .map_err(storage_error)?;

        info!(user_id = user.user_id(), contact_id = contact.id, "Contact created");
        Ok(contact)
    }

    pub async fn get<U: UserContext>(&self, user: &U, contact_id: Id) -> CtResult<ContactRow> {
        debug!(user_id = user.user_id(), contact_id, "Fetching contact");
        self.resolver.resolve_contact(user, contact_id).await
    }

    /// Full replace: optional fields missing from `params` are cleared
    pub async fn update<U: UserContext>(
        &self,
        user: &U,
        contact_id: Id,
        params: ContactParams,
    ) -> CtResult<ContactRow> {
        let data = ContactContract.validate(params)?;

        let contact = self
            .contacts
            .replace(user.user_id(), contact_id, &data)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("contact"))?;

        info!(user_id = user.user_id(), contact_id, "Contact updated");
        Ok(contact)
    }

    /// Deletes the contact together with its addresses
    pub async fn remove<U: UserContext>(&self, user: &U, contact_id: Id) -> CtResult<()> {
        let deleted = self
            .contacts
            .delete(user.user_id(), contact_id)
            .await
            .map_err(storage_error)?;

        if !deleted {
            return Err(CtError::not_found("contact"));
        }

        info!(user_id = user.user_id(), contact_id, "Contact removed");
        Ok(())
    }

    pub async fn search<U: UserContext>(
        &self,
        user: &U,
        params: SearchParams,
    ) -> CtResult<Page<ContactRow>> {
        let criteria = self.search_contract.validate(params)?;

        let (items, total) = self
            .contacts
            .search(user.user_id(), &criteria.filter, criteria.page)
            .await
            .map_err(storage_error)?;

        debug!(
            user_id = user.user_id(),
            page = criteria.page.page,
            total,
            "Contact search"
        );
        Ok(Page::new(items, criteria.page, total))
    }
}
