//! Repository tests against a live PostgreSQL.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p ct-db -- --ignored`.
//! Each test registers its own users, so runs do not interfere.

use ct_core::config::DatabaseConfig;
use ct_core::pagination::PageRequest;
use ct_db::{
    AddressRepository, AddressStore, ContactRepository, ContactStore, Database,
    RepositoryError, UserRepository, UserRow, UserStore,
};
use ct_models::{AddressData, ContactData, ContactFilter};

struct Fixture {
    contacts: ContactRepository,
    addresses: AddressRepository,
    users: UserRepository,
    owner: UserRow,
    other: UserRow,
}

async fn fixture() -> Fixture {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for postgres tests");
    let db = Database::connect(&DatabaseConfig {
        url,
        pool_size: 5,
        pool_timeout_seconds: 5,
        run_migrations: true,
    })
    .await
    .unwrap();
    db.migrate().await.unwrap();

    let users = UserRepository::new(db.pool().clone());
    let owner = users
        .insert(&unique("owner"), "hash", "Owner")
        .await
        .unwrap();
    let other = users
        .insert(&unique("other"), "hash", "Other")
        .await
        .unwrap();

    Fixture {
        contacts: ContactRepository::new(db.pool().clone()),
        addresses: AddressRepository::new(db.pool().clone()),
        users,
        owner,
        other,
    }
}

fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{nanos}")
}

fn contact(i: usize) -> ContactData {
    ContactData {
        first_name: format!("test {i}"),
        last_name: Some(format!("test {i}")),
        email: Some(format!("test{i}@test.com")),
        phone: Some(format!("0812345678{i}")),
    }
}

fn address() -> AddressData {
    AddressData {
        street: Some("jalan test".into()),
        city: Some("kota test".into()),
        province: None,
        country: "indonesia".into(),
        postal_code: "234234".into(),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn contact_statements_are_scoped_to_owner() {
    let f = fixture().await;
    let row = f.contacts.insert(f.owner.id, &contact(0)).await.unwrap();

    assert_eq!(f.contacts.find(f.owner.id, row.id).await.unwrap(), Some(row.clone()));
    assert_eq!(f.contacts.find(f.other.id, row.id).await.unwrap(), None);
    assert_eq!(
        f.contacts.replace(f.other.id, row.id, &contact(1)).await.unwrap(),
        None
    );
    assert!(!f.contacts.delete(f.other.id, row.id).await.unwrap());

    let replaced = f
        .contacts
        .replace(
            f.owner.id,
            row.id,
            &ContactData {
                first_name: "Eko".into(),
                last_name: None,
                email: None,
                phone: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.first_name, "Eko");
    assert_eq!(replaced.email, None);

    assert!(f.contacts.delete(f.owner.id, row.id).await.unwrap());
    assert_eq!(f.contacts.find(f.owner.id, row.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn search_pages_and_counts_one_snapshot() {
    let f = fixture().await;
    for i in 0..15 {
        f.contacts.insert(f.owner.id, &contact(i)).await.unwrap();
    }
    f.contacts.insert(f.other.id, &contact(1)).await.unwrap();

    let all = ContactFilter::default();
    let (items, total) = f
        .contacts
        .search(f.owner.id, &all, PageRequest::new(2, 10))
        .await
        .unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(total, 15);
    assert!(items.windows(2).all(|w| w[0].id < w[1].id));

    let by_name = ContactFilter {
        name: Some("TEST 1".into()),
        ..Default::default()
    };
    let (items, total) = f
        .contacts
        .search(f.owner.id, &by_name, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(total, 6);

    let by_phone = ContactFilter {
        phone: Some("08123456781".into()),
        ..Default::default()
    };
    let (_, total) = f
        .contacts
        .search(f.owner.id, &by_phone, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert_eq!(total, 6);

    let wildcard = ContactFilter {
        email: Some("%".into()),
        ..Default::default()
    };
    let (items, total) = f
        .contacts
        .search(f.owner.id, &wildcard, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn address_statements_are_scoped_through_contact() {
    let f = fixture().await;
    let mine = f.contacts.insert(f.owner.id, &contact(0)).await.unwrap();
    let sibling = f.contacts.insert(f.owner.id, &contact(1)).await.unwrap();

    assert_eq!(
        f.addresses.insert(f.other.id, mine.id, &address()).await.unwrap(),
        None
    );
    let row = f
        .addresses
        .insert(f.owner.id, mine.id, &address())
        .await
        .unwrap()
        .unwrap();

    assert!(f.addresses.find(f.owner.id, mine.id, row.id).await.unwrap().is_some());
    assert_eq!(f.addresses.find(f.other.id, mine.id, row.id).await.unwrap(), None);
    assert_eq!(f.addresses.find(f.owner.id, sibling.id, row.id).await.unwrap(), None);
    assert_eq!(
        f.addresses
            .replace(f.owner.id, sibling.id, row.id, &address())
            .await
            .unwrap(),
        None
    );
    assert!(!f.addresses.delete(f.other.id, mine.id, row.id).await.unwrap());

    assert_eq!(f.addresses.list(f.other.id, mine.id).await.unwrap(), None);
    assert_eq!(
        f.addresses.list(f.owner.id, mine.id).await.unwrap(),
        Some(vec![row.clone()])
    );

    // contact delete takes its addresses along
    assert!(f.contacts.delete(f.owner.id, mine.id).await.unwrap());
    assert_eq!(f.addresses.list(f.owner.id, mine.id).await.unwrap(), None);
    assert_eq!(f.addresses.find(f.owner.id, mine.id, row.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn users_conflict_and_tokens() {
    let f = fixture().await;

    let duplicate = f.users.insert(&f.owner.username, "hash", "Again").await;
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));

    let token = unique("token");
    assert!(f.users.set_token(f.owner.id, Some(&token)).await.unwrap());
    assert_eq!(
        f.users.find_by_token(&token).await.unwrap().map(|u| u.id),
        Some(f.owner.id)
    );

    let updated = f
        .users
        .update_profile(f.owner.id, Some("Renamed"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.password_hash, "hash");

    assert!(f.users.set_token(f.owner.id, None).await.unwrap());
    assert_eq!(f.users.find_by_token(&token).await.unwrap(), None);
}
