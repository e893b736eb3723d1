//! Contact types

use serde::{Deserialize, Serialize};

use core_kernel::ContactId;

/// Contact type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactType {
    Mobile,
    Home,
    Work,
}

/// A phone contact owned by exactly one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

/// Contact fields supplied by a caller when creating or updating a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

impl ContactDetails {
    /// Creates contact details with every field populated
    pub fn new(phone_number: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            contact_type: Some(contact_type),
        }
    }
}

impl Contact {
    /// Returns true when this contact carries exactly the given details
    pub fn matches(&self, details: &ContactDetails) -> bool {
        self.phone_number == details.phone_number && self.contact_type == details.contact_type
    }
}
