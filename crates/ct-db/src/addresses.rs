//! Addresses repository
//!
//! Table: addresses. Ownership is checked through the parent contact in the
//! same statement as the address lookup.

use async_trait::async_trait;
use ct_core::traits::Id;
use ct_models::AddressData;
use sqlx::PgPool;

use crate::repository::{AddressRow, AddressStore, RepositoryResult};

/// Address repository
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressStore for AddressRepository {
    async fn insert(
        &self,
        user_id: Id,
        contact_id: Id,
        data: &AddressData,
    ) -> RepositoryResult<Option<AddressRow>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            INSERT INTO addresses (contact_id, street, city, province, country, postal_code, created_at, updated_at)
            SELECT c.id, $3, $4, $5, $6, $7, NOW(), NOW()
            FROM contacts c
            WHERE c.id = $1 AND c.user_id = $2
            RETURNING id, contact_id, street, city, province, country, postal_code, created_at, updated_at
            "#,
        )
        .bind(contact_id)
        .bind(user_id)
        .bind(&data.street)
        .bind(&data.city)
        .bind(&data.province)
        .bind(&data.country)
        .bind(&data.postal_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find(
        &self,
        user_id: Id,
        contact_id: Id,
        id: Id,
    ) -> RepositoryResult<Option<AddressRow>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT a.id, a.contact_id, a.street, a.city, a.province, a.country, a.postal_code,
                   a.created_at, a.updated_at
            FROM addresses a
            JOIN contacts c ON c.id = a.contact_id
            WHERE a.id = $1 AND a.contact_id = $2 AND c.user_id = $3
            "#,
        )
        .bind(id)
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn replace(
        &self,
        user_id: Id,
        contact_id: Id,
        id: Id,
        data: &AddressData,
    ) -> RepositoryResult<Option<AddressRow>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            UPDATE addresses a
            SET street = $4, city = $5, province = $6, country = $7, postal_code = $8,
                updated_at = NOW()
            FROM contacts c
            WHERE a.id = $1 AND a.contact_id = $2 AND c.id = a.contact_id AND c.user_id = $3
            RETURNING a.id, a.contact_id, a.street, a.city, a.province, a.country, a.postal_code,
                      a.created_at, a.updated_at
            "#,
        )
        .bind(id)
        .bind(contact_id)
        .bind(user_id)
        .bind(&data.street)
        .bind(&data.city)
        .bind(&data.province)
        .bind(&data.country)
        .bind(&data.postal_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, user_id: Id, contact_id: Id, id: Id) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM addresses a
            USING contacts c
            WHERE a.id = $1 AND a.contact_id = $2 AND c.id = a.contact_id AND c.user_id = $3
            "#,
        )
        .bind(id)
        .bind(contact_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, user_id: Id, contact_id: Id) -> RepositoryResult<Option<Vec<AddressRow>>> {
        let mut tx = self.pool.begin().await?;

        // Lock the contact so it cannot be deleted between the two reads
        let owned = sqlx::query_scalar::<_, Id>(
            "SELECT id FROM contacts WHERE id = $1 AND user_id = $2 FOR SHARE",
        )
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, contact_id, street, city, province, country, postal_code, created_at, updated_at
            FROM addresses
            WHERE contact_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(contact_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(rows))
    }
}
