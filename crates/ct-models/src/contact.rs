//! Contact write models and search criteria
//!
//! Table: contacts

use ct_core::pagination::PageRequest;
use serde::Deserialize;
use validator::Validate;

/// Request body for creating or replacing a contact
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactParams {
    #[validate(required, length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email, length(min = 1, max = 200))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub phone: Option<String>,
}

impl ContactParams {
    /// Fields in the order their errors are reported
    pub const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email", "phone"];
}

/// A validated contact. Update writes every field, so `None` clears the
/// stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactData {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Query string of `GET /api/contacts`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(range(min = 1))]
    pub page: Option<i64>,

    #[validate(range(min = 1))]
    pub size: Option<i64>,

    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 200))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

impl SearchParams {
    pub const FIELDS: &'static [&'static str] = &["page", "size", "name", "email", "phone"];
}

/// Free-text filters, AND-combined. Blank filters are dropped before this
/// is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Case-insensitive substring of first or last name
    pub name: Option<String>,
    /// Case-insensitive substring of email
    pub email: Option<String>,
    /// Substring of phone
    pub phone: Option<String>,
}

impl ContactFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSearch {
    pub filter: ContactFilter,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_first_name_fails_required() {
        let params = ContactParams::default();
        let errors = params.validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(field_errors["first_name"][0].code, "required");
    }

    #[test]
    fn test_optional_fields_skip_validation_when_absent() {
        let params = ContactParams {
            first_name: Some("Budi".into()),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_decodes_null_as_absent() {
        let params: ContactParams =
            serde_json::from_str(r#"{"first_name":"Budi","email":null}"#).unwrap();
        assert_eq!(params.email, None);
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(ContactFilter::default().is_empty());
        let filter = ContactFilter {
            phone: Some("0812".into()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
