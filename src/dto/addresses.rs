use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Validator;
use crate::{
    error::AppError,
    models::{Address, AddressBook, AddressType},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddAddressRequest {
    #[serde(default)]
    pub label: String,
    pub address_type: Option<AddressType>,
    pub full_address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub make_default: bool,
}

impl AddAddressRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .not_blank(&self.full_address, "full_address")
            .finish()
    }

    pub fn into_address(self) -> Address {
        Address {
            id: Uuid::new_v4(),
            label: self.label,
            address_type: self.address_type.unwrap_or_default(),
            full_address: self.full_address.trim().to_string(),
            phone: self.phone,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    pub label: Option<String>,
    pub address_type: Option<AddressType>,
    pub full_address: Option<String>,
    pub phone: Option<String>,
}

impl UpdateAddressRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        if let Some(full_address) = &self.full_address {
            v.not_blank(full_address, "full_address");
        }
        v.finish()
    }

    pub fn apply(self, address: &mut Address) {
        if let Some(label) = self.label {
            address.label = label;
        }
        if let Some(address_type) = self.address_type {
            address.address_type = address_type;
        }
        if let Some(full_address) = self.full_address {
            address.full_address = full_address.trim().to_string();
        }
        if let Some(phone) = self.phone {
            address.phone = phone;
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressBookResponse {
    pub addresses: Vec<Address>,
    pub default_address_id: Option<Uuid>,
}

impl From<AddressBook> for AddressBookResponse {
    fn from(book: AddressBook) -> Self {
        Self {
            addresses: book.addresses,
            default_address_id: book.default_address_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Address {
        AddAddressRequest {
            label: "Home".into(),
            address_type: None,
            full_address: "  123 Main St  ".into(),
            phone: String::new(),
            make_default: false,
        }
        .into_address()
    }

    #[test]
    fn new_address_is_stored_trimmed() {
        let address = stored();
        assert_eq!(address.full_address, "123 Main St");
        assert_eq!(address.address_type, AddressType::default());
    }

    #[test]
    fn edited_address_is_stored_trimmed() {
        let mut address = stored();
        UpdateAddressRequest {
            full_address: Some(" 9 Harbour Rd\n".into()),
            ..UpdateAddressRequest::default()
        }
        .apply(&mut address);
        assert_eq!(address.full_address, "9 Harbour Rd");
        assert_eq!(address.label, "Home");
    }

    #[test]
    fn blank_edit_is_rejected() {
        let req = UpdateAddressRequest {
            full_address: Some("   ".into()),
            ..UpdateAddressRequest::default()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }
}
