//! Contract for address create and update

use ct_core::error::ValidationErrors;
use ct_models::{AddressData, AddressParams};

use crate::base::{check_fields, required, Contract};

#[derive(Debug, Default, Clone, Copy)]
pub struct AddressContract;

impl Contract<AddressParams> for AddressContract {
    type Output = AddressData;

    fn validate(&self, input: AddressParams) -> Result<AddressData, ValidationErrors> {
        check_fields(&input, AddressParams::FIELDS)?;

        let country = input.country.ok_or_else(|| required("country"))?;
        let postal_code = input.postal_code.ok_or_else(|| required("postal_code"))?;
        Ok(AddressData {
            street: input.street,
            city: input.city,
            province: input.province,
            country,
            postal_code,
        })
    }
}
