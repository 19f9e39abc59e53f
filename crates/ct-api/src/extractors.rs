//! Axum extractors for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use ct_auth::{AuthError, AuthResult, Authenticator, CurrentUser, RequestHeaders};
use ct_core::config::PagingConfig;
use ct_db::{MemoryStore, Stores};
use ct_services::Services;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub authenticator: Authenticator,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        let authenticator = Authenticator::new(Arc::new(services.users.clone()));
        Self {
            services,
            authenticator,
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory(paging: PagingConfig) -> Self {
        Self::new(Services::new(Stores::memory(MemoryStore::new()), paging))
    }
}

/// Authenticated user extractor
///
/// Rejects with 401 before the handler runs when the token is missing or
/// unknown.
pub struct AuthenticatedUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let headers = RequestHeaders {
            authorization: parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        };

        match app_state.authenticator.authenticate(&headers).await {
            AuthResult::Authenticated(user) => Ok(AuthenticatedUser(user)),
            AuthResult::Failed(AuthError::Internal(detail)) => Err(ApiError::internal(detail)),
            AuthResult::Failed(_) => Err(ApiError::unauthorized("Unauthorized")),
        }
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = CurrentUser;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON body whose decode failures are reported as 400 `{errors}`
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// Query string whose decode failures are reported as 400 `{errors}`
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// Path ids. A segment that is not a number cannot name a stored record,
/// so it is reported as 404 instead of a decode error.
pub struct Ids<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Ids<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Ids(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Unparseable path id");
                Err(ApiError::not_found("Not found"))
            }
        }
    }
}
