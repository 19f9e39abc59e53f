//! Contract for contact search queries

use ct_core::config::PagingConfig;
use ct_core::error::ValidationErrors;
use ct_core::pagination::PageRequest;
use ct_models::{ContactFilter, ContactSearch, SearchParams};

use crate::base::{check_fields, Contract};

/// Checks page bounds against the configured limits and drops blank
/// filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchContract {
    paging: PagingConfig,
}

impl SearchContract {
    pub fn new(paging: PagingConfig) -> Self {
        Self { paging }
    }
}

impl Contract<SearchParams> for SearchContract {
    type Output = ContactSearch;

    fn validate(&self, input: SearchParams) -> Result<ContactSearch, ValidationErrors> {
        let mut errors = match check_fields(&input, SearchParams::FIELDS) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let size = input.size.unwrap_or(self.paging.default_size);
        if size > self.paging.max_size {
            errors.add(
                "size",
                "range",
                format!("must be at most {}", self.paging.max_size),
            );
        }
        errors.into_result()?;

        Ok(ContactSearch {
            filter: ContactFilter {
                name: non_blank(input.name),
                email: non_blank(input.email),
                phone: non_blank(input.phone),
            },
            page: PageRequest::new(input.page.unwrap_or(1), size),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
