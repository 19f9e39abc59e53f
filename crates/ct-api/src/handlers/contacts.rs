//! Contacts API handlers

use axum::{extract::State, response::IntoResponse};
use ct_core::traits::Id;
use ct_db::ContactRow;
use ct_models::{ContactParams, SearchParams};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiQuery, AppState, AuthenticatedUser, Ids};
use crate::response::{ok, DataResponse};

/// Search the caller's contacts
///
/// GET /api/contacts?page&size&name&email&phone
pub async fn search_contacts(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<impl IntoResponse> {
    let page = state.services.contacts.search(&*user, params).await?;
    Ok(DataResponse::paged(page, ContactResponse::from_row))
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(params): ApiJson<ContactParams>,
) -> ApiResult<impl IntoResponse> {
    let row = state.services.contacts.create(&*user, params).await?;
    Ok(DataResponse::new(ContactResponse::from_row(row)))
}

/// GET /api/contacts/:contact_id
pub async fn get_contact(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids(contact_id): Ids<Id>,
) -> ApiResult<impl IntoResponse> {
    let row = state.services.contacts.get(&*user, contact_id).await?;
    Ok(DataResponse::new(ContactResponse::from_row(row)))
}

/// Replace every field of a contact
///
/// PUT /api/contacts/:contact_id
pub async fn update_contact(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids(contact_id): Ids<Id>,
    ApiJson(params): ApiJson<ContactParams>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .services
        .contacts
        .update(&*user, contact_id, params)
        .await?;
    Ok(DataResponse::new(ContactResponse::from_row(row)))
}

/// DELETE /api/contacts/:contact_id
pub async fn delete_contact(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids(contact_id): Ids<Id>,
) -> ApiResult<impl IntoResponse> {
    state.services.contacts.remove(&*user, contact_id).await?;
    Ok(ok())
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: Id,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactResponse {
    pub fn from_row(row: ContactRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
        }
    }
}
