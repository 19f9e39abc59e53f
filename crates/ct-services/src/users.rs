//! User service: registration, login and the current-user profile

use std::sync::Arc;

use async_trait::async_trait;
use ct_auth::{generate_token, hash_password, verify_password, AuthError, CurrentUser, TokenResolver};
use ct_contracts::{Contract, LoginContract, RegisterContract, UpdateUserContract};
use ct_core::traits::UserContext;
use ct_core::{CtError, CtResult};
use ct_db::{UserRow, UserStore};
use ct_models::{LoginParams, RegisterParams, UpdateUserParams};
use tracing::{debug, info, warn};

use crate::error::storage_error;

const LOGIN_FAILED: &str = "Username or password wrong";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn register(&self, params: RegisterParams) -> CtResult<UserRow> {
        let new_user = RegisterContract.validate(params)?;

        let password_hash = hash(new_user.password).await?;
        let user = self
            .users
            .insert(&new_user.username, &password_hash, &new_user.name)
            .await
            .map_err(storage_error)?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Issue a fresh token for valid credentials
    pub async fn login(&self, params: LoginParams) -> CtResult<String> {
        let credentials = LoginContract.validate(params)?;

        let Some(user) = self
            .users
            .find_by_username(&credentials.username)
            .await
            .map_err(storage_error)?
        else {
            warn!(username = %credentials.username, "Login for unknown user");
            return Err(CtError::unauthorized(LOGIN_FAILED));
        };

        if !verify(credentials.password, user.password_hash.clone()).await? {
            warn!(username = %credentials.username, "Login with wrong password");
            return Err(CtError::unauthorized(LOGIN_FAILED));
        }

        let token = generate_token();
        self.users
            .set_token(user.id, Some(&token))
            .await
            .map_err(storage_error)?;

        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    pub async fn current<U: UserContext>(&self, user: &U) -> CtResult<UserRow> {
        self.users
            .find_by_username(user.username())
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("user"))
    }

    pub async fn update<U: UserContext>(&self, user: &U, params: UpdateUserParams) -> CtResult<UserRow> {
        let changes = UpdateUserContract.validate(params)?;

        let password_hash = match changes.password {
            Some(password) => Some(hash(password).await?),
            None => None,
        };

        let updated = self
            .users
            .update_profile(user.user_id(), changes.name.as_deref(), password_hash.as_deref())
            .await
            .map_err(storage_error)?
            .ok_or_else(|| CtError::not_found("user"))?;

        info!(user_id = updated.id, "User updated");
        Ok(updated)
    }

    /// Clear the user's token; requests carrying it are rejected afterwards
    pub async fn logout<U: UserContext>(&self, user: &U) -> CtResult<()> {
        let cleared = self
            .users
            .set_token(user.user_id(), None)
            .await
            .map_err(storage_error)?;

        if !cleared {
            return Err(CtError::not_found("user"));
        }

        info!(user_id = user.user_id(), "User logged out");
        Ok(())
    }
}

#[async_trait]
impl TokenResolver for UserService {
    async fn resolve_token(&self, token: &str) -> Result<Option<CurrentUser>, AuthError> {
        let user = self
            .users
            .find_by_token(token)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        debug!(found = user.is_some(), "Token lookup");
        Ok(user.map(|u| CurrentUser::new(u.id, u.username, u.name)))
    }
}

/// Argon2 is CPU-bound, so hashing runs on the blocking pool
async fn hash(password: String) -> CtResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| CtError::Internal(e.to_string()))?
        .map_err(|e| CtError::Internal(e.to_string()))
}

async fn verify(password: String, stored_hash: String) -> CtResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| CtError::Internal(e.to_string()))
}
