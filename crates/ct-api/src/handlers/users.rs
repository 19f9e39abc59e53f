//! Users API handlers

use axum::{extract::State, response::IntoResponse};
use ct_db::UserRow;
use ct_models::{LoginParams, RegisterParams, UpdateUserParams};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AppState, AuthenticatedUser};
use crate::response::{ok, DataResponse};

/// POST /api/users
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<RegisterParams>,
) -> ApiResult<impl IntoResponse> {
    let row = state.services.users.register(params).await?;
    Ok(DataResponse::new(UserResponse::from_row(row)))
}

/// POST /api/users/login
pub async fn login_user(
    State(state): State<AppState>,
    ApiJson(params): ApiJson<LoginParams>,
) -> ApiResult<impl IntoResponse> {
    let token = state.services.users.login(params).await?;
    Ok(DataResponse::new(TokenResponse { token }))
}

/// GET /api/users/current
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    let row = state.services.users.current(&*user).await?;
    Ok(DataResponse::new(UserResponse::from_row(row)))
}

/// PATCH /api/users/current
pub async fn update_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(params): ApiJson<UpdateUserParams>,
) -> ApiResult<impl IntoResponse> {
    let row = state.services.users.update(&*user, params).await?;
    Ok(DataResponse::new(UserResponse::from_row(row)))
}

/// DELETE /api/users/logout
pub async fn logout_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    state.services.users.logout(&*user).await?;
    Ok(ok())
}

/// Public view of a user; the password hash and token never leave
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
}

impl UserResponse {
    pub fn from_row(row: UserRow) -> Self {
        Self {
            username: row.username,
            name: row.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
