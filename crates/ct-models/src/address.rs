//! Address write models
//!
//! Table: addresses

use serde::Deserialize;
use validator::Validate;

/// Request body for creating or replacing an address
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddressParams {
    #[validate(length(min = 1, max = 255))]
    pub street: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub province: Option<String>,

    #[validate(required, length(min = 1, max = 100))]
    pub country: Option<String>,

    #[validate(required, length(min = 1, max = 10))]
    pub postal_code: Option<String>,
}

impl AddressParams {
    pub const FIELDS: &'static [&'static str] =
        &["street", "city", "province", "country", "postal_code"];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressData {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}
