//! Users repository
//!
//! Table: users

use async_trait::async_trait;
use ct_core::traits::Id;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult, UserRow, UserStore};

/// User repository
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> RepositoryResult<UserRow> {
        let result = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, name, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, username, password_hash, name, token, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                RepositoryError::Conflict("Username already exists".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, name, token, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_token(&self, token: &str) -> RepositoryResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, name, token, created_at, updated_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_profile(
        &self,
        id: Id,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> RepositoryResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, password_hash, name, token, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn set_token(&self, id: Id, token: Option<&str>) -> RepositoryResult<bool> {
        let result = sqlx::query("UPDATE users SET token = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
