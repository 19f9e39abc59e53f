//! Addresses API handlers, nested under a contact

use axum::{extract::State, response::IntoResponse};
use ct_core::traits::Id;
use ct_db::AddressRow;
use ct_models::AddressParams;
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, AuthenticatedUser, Ids};
use crate::response::{ok, DataResponse};

/// GET /api/contacts/:contact_id/addresses
pub async fn list_addresses(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids(contact_id): Ids<Id>,
) -> ApiResult<impl IntoResponse> {
    let rows = state.services.addresses.list(&*user, contact_id).await?;
    let data: Vec<AddressResponse> = rows.into_iter().map(AddressResponse::from_row).collect();
    Ok(DataResponse::new(data))
}

/// POST /api/contacts/:contact_id/addresses
pub async fn create_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids(contact_id): Ids<Id>,
    ApiJson(params): ApiJson<AddressParams>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .services
        .addresses
        .create(&*user, contact_id, params)
        .await?;
    Ok(DataResponse::new(AddressResponse::from_row(row)))
}

/// GET /api/contacts/:contact_id/addresses/:address_id
pub async fn get_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids((contact_id, address_id)): Ids<(Id, Id)>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .services
        .addresses
        .get(&*user, contact_id, address_id)
        .await?;
    Ok(DataResponse::new(AddressResponse::from_row(row)))
}

/// PUT /api/contacts/:contact_id/addresses/:address_id
pub async fn update_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids((contact_id, address_id)): Ids<(Id, Id)>,
    ApiJson(params): ApiJson<AddressParams>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .services
        .addresses
        .update(&*user, contact_id, address_id, params)
        .await?;
    Ok(DataResponse::new(AddressResponse::from_row(row)))
}

/// DELETE /api/contacts/:contact_id/addresses/:address_id
pub async fn delete_address(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Ids((contact_id, address_id)): Ids<(Id, Id)>,
) -> ApiResult<impl IntoResponse> {
    state
        .services
        .addresses
        .remove(&*user, contact_id, address_id)
        .await?;
    Ok(ok())
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub id: Id,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl AddressResponse {
    pub fn from_row(row: AddressRow) -> Self {
        Self {
            id: row.id,
            street: row.street,
            city: row.city,
            province: row.province,
            country: row.country,
            postal_code: row.postal_code,
        }
    }
}
