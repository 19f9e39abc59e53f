//! In-memory store
//!
//! Implements every store trait over a single `RwLock`, so a contact delete
//! and the removal of its addresses happen under one write guard. Used by
//! the test suites and when the server starts without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ct_core::pagination::PageRequest;
use ct_core::traits::Id;
use ct_models::{AddressData, ContactData, ContactFilter};
use tokio::sync::RwLock;

use crate::repository::{
    AddressRow, AddressStore, ContactRow, ContactStore, RepositoryError, RepositoryResult,
    UserRow, UserStore,
};

#[derive(Debug, Default)]
struct State {
    last_user_id: Id,
    last_contact_id: Id,
    last_address_id: Id,
    users: BTreeMap<Id, UserRow>,
    contacts: BTreeMap<Id, ContactRow>,
    addresses: BTreeMap<Id, AddressRow>,
}

impl State {
    fn owned_contact(&self, user_id: Id, id: Id) -> Option<&ContactRow> {
        self.contacts.get(&id).filter(|c| c.user_id == user_id)
    }

    fn owned_address_mut(&mut self, user_id: Id, contact_id: Id, id: Id) -> Option<&mut AddressRow> {
        self.owned_contact(user_id, contact_id)?;
        self.addresses
            .get_mut(&id)
            .filter(|a| a.contact_id == contact_id)
    }
}

/// Shared in-process backend; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.map_or(false, |h| h.to_lowercase().contains(&needle.to_lowercase()))
}

fn matches_filter(contact: &ContactRow, filter: &ContactFilter) -> bool {
    let name_ok = filter.name.as_deref().map_or(true, |name| {
        contains_ignore_case(Some(&contact.first_name), name)
            || contains_ignore_case(contact.last_name.as_deref(), name)
    });
    let email_ok = filter
        .email
        .as_deref()
        .map_or(true, |email| contains_ignore_case(contact.email.as_deref(), email));
    let phone_ok = filter.phone.as_deref().map_or(true, |phone| {
        contact.phone.as_deref().map_or(false, |p| p.contains(phone))
    });
    name_ok && email_ok && phone_ok
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert(&self, user_id: Id, data: &ContactData) -> RepositoryResult<ContactRow> {
        let mut state = self.state.write().await;
        state.last_contact_id += 1;
        let now = Utc::now();
        let row = ContactRow {
            id: state.last_contact_id,
            user_id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            created_at: now,
            updated_at: now,
        };
        state.contacts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find(&self, user_id: Id, id: Id) -> RepositoryResult<Option<ContactRow>> {
        let state = self.state.read().await;
        Ok(state.owned_contact(user_id, id).cloned())
    }

    async fn replace(
        &self,
        user_id: Id,
        id: Id,
        data: &ContactData,
    ) -> RepositoryResult<Option<ContactRow>> {
        let mut state = self.state.write().await;
        let Some(row) = state.contacts.get_mut(&id).filter(|c| c.user_id == user_id) else {
            return Ok(None);
        };
        row.first_name = data.first_name.clone();
        row.last_name = data.last_name.clone();
        row.email = data.email.clone();
        row.phone = data.phone.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, user_id: Id, id: Id) -> RepositoryResult<bool> {
        let mut state = self.state.write().await;
        if state.owned_contact(user_id, id).is_none() {
            return Ok(false);
        }
        state.contacts.remove(&id);
        state.addresses.retain(|_, a| a.contact_id != id);
        Ok(true)
    }

    async fn search(
        &self,
        user_id: Id,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> RepositoryResult<(Vec<ContactRow>, i64)> {
        let state = self.state.read().await;
        let matched: Vec<&ContactRow> = state
            .contacts
            .values()
            .filter(|c| c.user_id == user_id && matches_filter(c, filter))
            .collect();

        let total = matched.len() as i64;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let items = matched.into_iter().skip(skip).take(take).cloned().collect();
        Ok((items, total))
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn insert(
        &self,
        user_id: Id,
        contact_id: Id,
        data: &AddressData,
    ) -> RepositoryResult<Option<AddressRow>> {
        let mut state = self.state.write().await;
        if state.owned_contact(user_id, contact_id).is_none() {
            return Ok(None);
        }
        state.last_address_id += 1;
        let now = Utc::now();
        let row = AddressRow {
            id: state.last_address_id,
            contact_id,
            street: data.street.clone(),
            city: data.city.clone(),
            province: data.province.clone(),
            country: data.country.clone(),
            postal_code: data.postal_code.clone(),
            created_at: now,
            updated_at: now,
        };
        state.addresses.insert(row.id, row.clone());
        Ok(Some(row))
    }

    async fn find(
        &self,
        user_id: Id,
        contact_id: Id,
        id: Id,
    ) -> RepositoryResult<Option<AddressRow>> {
        let state = self.state.read().await;
        if state.owned_contact(user_id, contact_id).is_none() {
            return Ok(None);
        }
        Ok(state
            .addresses
            .get(&id)
            .filter(|a| a.contact_id == contact_id)
            .cloned())
    }

    async fn replace(
        &self,
        user_id: Id,
        contact_id: Id,
        id: Id,
        data: &AddressData,
    ) -> RepositoryResult<Option<AddressRow>> {
        let mut state = self.state.write().await;
        let Some(row) = state.owned_address_mut(user_id, contact_id, id) else {
            return Ok(None);
        };
        row.street = data.street.clone();
        row.city = data.city.clone();
        row.province = data.province.clone();
        row.country = data.country.clone();
        row.postal_code = data.postal_code.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, user_id: Id, contact_id: Id, id: Id) -> RepositoryResult<bool> {
        let mut state = self.state.write().await;
        if state.owned_address_mut(user_id, contact_id, id).is_none() {
            return Ok(false);
        }
        state.addresses.remove(&id);
        Ok(true)
    }

    async fn list(&self, user_id: Id, contact_id: Id) -> RepositoryResult<Option<Vec<AddressRow>>> {
        let state = self.state.read().await;
        if state.owned_contact(user_id, contact_id).is_none() {
            return Ok(None);
        }
        Ok(Some(
            state
                .addresses
                .values()
                .filter(|a| a.contact_id == contact_id)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> RepositoryResult<UserRow> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.username == username) {
            return Err(RepositoryError::Conflict(
                "Username already exists".to_string(),
            ));
        }
        state.last_user_id += 1;
        let now = Utc::now();
        let row = UserRow {
            id: state.last_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
            token: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<UserRow>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_token(&self, token: &str) -> RepositoryResult<Option<UserRow>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Id,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> RepositoryResult<Option<UserRow>> {
        let mut state = self.state.write().await;
        let Some(row) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(hash) = password_hash {
            row.password_hash = hash.to_string();
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn set_token(&self, id: Id, token: Option<&str>) -> RepositoryResult<bool> {
        let mut state = self.state.write().await;
        let Some(row) = state.users.get_mut(&id) else {
            return Ok(false);
        };
        row.token = token.map(str::to_string);
        row.updated_at = Utc::now();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first_name: &str, email: &str, phone: &str) -> ContactData {
        ContactData {
            first_name: first_name.to_string(),
            last_name: Some("test".to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
        }
    }

    fn address() -> AddressData {
        AddressData {
            street: Some("Jalan test".to_string()),
            city: None,
            province: None,
            country: "Indonesia".to_string(),
            postal_code: "234234".to_string(),
        }
    }

    async fn seed(store: &MemoryStore, user_id: Id) {
        for i in 0..15 {
            ContactStore::insert(
                store,
                user_id,
                &contact(
                    &format!("test {i}"),
                    &format!("test{i}@example.com"),
                    &format!("0812345678{i}"),
                ),
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_contacts_are_scoped_by_owner() {
        let store = MemoryStore::new();
        let row = ContactStore::insert(&store, 1, &contact("Budi", "budi@example.com", "0812"))
            .await
            .unwrap();

        assert!(ContactStore::find(&store, 1, row.id).await.unwrap().is_some());
        assert!(ContactStore::find(&store, 2, row.id).await.unwrap().is_none());
        assert!(!ContactStore::delete(&store, 2, row.id).await.unwrap());
        assert!(
            ContactStore::replace(&store, 2, row.id, &contact("Eko", "eko@example.com", "0813"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_search_pages_and_filters() {
        let store = MemoryStore::new();
        seed(&store, 1).await;
        seed(&store, 2).await;

        let (items, total) = store
            .search(1, &ContactFilter::default(), PageRequest::new(2, 10))
            .await
            .unwrap();
        assert_eq!(total, 15);
        assert_eq!(items.len(), 5);
        assert!(items.windows(2).all(|w| w[0].id < w[1].id));

        let filter = ContactFilter {
            name: Some("TEST 1".into()),
            email: Some("test1".into()),
            phone: Some("08123456781".into()),
        };
        let (items, total) = store
            .search(1, &filter, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(total, 6);
        assert_eq!(items.len(), 6);
    }

    #[tokio::test]
    async fn test_delete_contact_cascades_to_addresses() {
        let store = MemoryStore::new();
        let row = ContactStore::insert(&store, 1, &contact("Budi", "budi@example.com", "0812"))
            .await
            .unwrap();
        let addr = AddressStore::insert(&store, 1, row.id, &address())
            .await
            .unwrap()
            .unwrap();

        assert!(ContactStore::delete(&store, 1, row.id).await.unwrap());
        assert!(AddressStore::find(&store, 1, row.id, addr.id)
            .await
            .unwrap()
            .is_none());
        assert!(store.state.read().await.addresses.is_empty());
    }

    #[tokio::test]
    async fn test_address_requires_matching_contact() {
        let store = MemoryStore::new();
        let first = ContactStore::insert(&store, 1, &contact("A", "a@example.com", "1"))
            .await
            .unwrap();
        let second = ContactStore::insert(&store, 1, &contact("B", "b@example.com", "2"))
            .await
            .unwrap();
        let addr = AddressStore::insert(&store, 1, first.id, &address())
            .await
            .unwrap()
            .unwrap();

        assert!(AddressStore::find(&store, 1, second.id, addr.id)
            .await
            .unwrap()
            .is_none());
        assert!(AddressStore::insert(&store, 2, first.id, &address())
            .await
            .unwrap()
            .is_none());
        assert!(AddressStore::list(&store, 2, first.id).await.unwrap().is_none());
        assert_eq!(
            AddressStore::list(&store, 1, first.id).await.unwrap().unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        UserStore::insert(&store, "test", "hash", "Test").await.unwrap();
        let err = UserStore::insert(&store, "test", "hash", "Other")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_token_lookup() {
        let store = MemoryStore::new();
        let user = UserStore::insert(&store, "test", "hash", "Test").await.unwrap();
        store.set_token(user.id, Some("abc")).await.unwrap();

        let found = store.find_by_token("abc").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        store.set_token(user.id, None).await.unwrap();
        assert!(store.find_by_token("abc").await.unwrap().is_none());
    }
}
