//! Address types

use serde::{Deserialize, Serialize};

use core_kernel::AddressId;

/// Address type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    Home,
    Work,
    Other,
}

/// A postal address owned by exactly one customer
///
/// The owning customer is not referenced from here; the link lives on the
/// stored row (`AddressRecord::customer_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

/// Address fields supplied by a caller when creating or updating a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDetails {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

impl AddressDetails {
    /// Creates address details with every field populated
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
        address_type: AddressType,
    ) -> Self {
        Self {
            street: Some(street.into()),
            city: Some(city.into()),
            state: Some(state.into()),
            zip: Some(zip.into()),
            address_type: Some(address_type),
        }
    }
}

impl Address {
    /// Returns true when this address carries exactly the given details
    pub fn matches(&self, details: &AddressDetails) -> bool {
        self.street == details.street
            && self.city == details.city
            && self.state == details.state
            && self.zip == details.zip
            && self.address_type == details.address_type
    }
}
