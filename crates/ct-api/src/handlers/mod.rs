//! API handlers

pub mod addresses;
pub mod contacts;
pub mod users;
