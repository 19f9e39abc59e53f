//! API routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{addresses, contacts, users};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users_router())
        .nest("/contacts", contacts_router())
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register_user))
        .route("/login", post(users::login_user))
        .route(
            "/current",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/logout", delete(users::logout_user))
}

fn contacts_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contacts::search_contacts).post(contacts::create_contact),
        )
        .route(
            "/:contact_id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        .route(
            "/:contact_id/addresses",
            get(addresses::list_addresses).post(addresses::create_address),
        )
        .route(
            "/:contact_id/addresses/:address_id",
            get(addresses::get_address)
                .put(addresses::update_address)
                .delete(addresses::delete_address),
        )
}
