//! Contract for contact create and update

use ct_core::error::ValidationErrors;
use ct_models::{ContactData, ContactParams};

use crate::base::{check_fields, required, Contract};

/// Used for both create and update: update replaces every field, so it
/// accepts exactly what create accepts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactContract;

impl Contract<ContactParams> for ContactContract {
    type Output = ContactData;

    fn validate(&self, input: ContactParams) -> Result<ContactData, ValidationErrors> {
        check_fields(&input, ContactParams::FIELDS)?;

        let first_name = input.first_name.ok_or_else(|| required("first_name"))?;
        Ok(ContactData {
            first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contact() {
        let data = ContactContract
            .validate(ContactParams {
                first_name: Some("Budi".into()),
                last_name: Some("Santoso".into()),
                email: Some("budi@example.com".into()),
                phone: Some("08123456789".into()),
            })
            .unwrap();

        assert_eq!(data.first_name, "Budi");
        assert_eq!(data.phone.as_deref(), Some("08123456789"));
    }

    #[test]
    fn test_reports_all_violations() {
        let errors = ContactContract
            .validate(ContactParams {
                first_name: Some(String::new()),
                last_name: None,
                email: Some("budi".into()),
                phone: Some("0".repeat(30)),
            })
            .unwrap_err();

        assert!(errors.has_error("first_name"));
        assert!(errors.has_error("email"));
        assert!(errors.has_error("phone"));
        assert!(!errors.has_error("last_name"));
    }

    #[test]
    fn test_first_name_required() {
        let errors = ContactContract
            .validate(ContactParams::default())
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("first_name")[0].rule, "required");
    }
}
