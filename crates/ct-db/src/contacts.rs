//! Contacts repository
//!
//! Table: contacts

use async_trait::async_trait;
use ct_core::pagination::PageRequest;
use ct_core::traits::Id;
use ct_models::{ContactData, ContactFilter};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::repository::{ContactRow, ContactStore, RepositoryResult};

const CONTACT_COLUMNS: &str =
    "id, user_id, first_name, last_name, email, phone, created_at, updated_at";

/// Contact repository
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `SELECT <head> FROM contacts WHERE <owner and filters>`
    fn filtered(head: &str, user_id: Id, filter: &ContactFilter) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {head} FROM contacts WHERE user_id = "));
        builder.push_bind(user_id);

        if let Some(name) = &filter.name {
            let pattern = contains_pattern(name);
            builder
                .push(" AND (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(email) = &filter.email {
            builder.push(" AND email ILIKE ").push_bind(contains_pattern(email));
        }
        if let Some(phone) = &filter.phone {
            builder.push(" AND phone LIKE ").push_bind(contains_pattern(phone));
        }

        builder
    }
}

/// Wrap `term` in `%...%`, escaping the LIKE wildcards it contains
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ContactStore for ContactRepository {
    async fn insert(&self, user_id: Id, data: &ContactData) -> RepositoryResult<ContactRow> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, user_id, first_name, last_name, email, phone, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find(&self, user_id: Id, id: Id) -> RepositoryResult<Option<ContactRow>> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, first_name, last_name, email, phone, created_at, updated_at
            FROM contacts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn replace(
        &self,
        user_id: Id,
        id: Id,
        data: &ContactData,
    ) -> RepositoryResult<Option<ContactRow>> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            UPDATE contacts
            SET first_name = $3, last_name = $4, email = $5, phone = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, first_name, last_name, email, phone, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, user_id: Id, id: Id) -> RepositoryResult<bool> {
        // addresses go with it through ON DELETE CASCADE, inside this statement
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        user_id: Id,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> RepositoryResult<(Vec<ContactRow>, i64)> {
        let mut query = Self::filtered(CONTACT_COLUMNS, user_id, filter);
        query
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        // Page and count read the same snapshot
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let items = query
            .build_query_as::<ContactRow>()
            .fetch_all(&mut *tx)
            .await?;

        let total = Self::filtered("COUNT(*)", user_id, filter)
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(user_id, total, returned = items.len(), "contact search");

        Ok((items, total))
    }
}
