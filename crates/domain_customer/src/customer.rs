//! Customer aggregate
//!
//! A [`Customer`] is assembled from one customer row plus at most one address
//! row and one contact row that point back to it. The aggregate holds plain
//! copies of its parts; ownership is expressed only through the foreign keys
//! stored on the part rows.

use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;

use crate::address::{Address, AddressDetails};
use crate::contact::{Contact, ContactDetails};
use crate::ports::{AddressRecord, ContactRecord, CustomerRecord};

/// A customer together with its owned address and contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<Address>,
    pub contact: Option<Contact>,
}

impl Customer {
    /// Assembles the aggregate from its stored rows
    pub fn from_records(
        customer: CustomerRecord,
        address: Option<AddressRecord>,
        contact: Option<ContactRecord>,
    ) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            address: address.map(AddressRecord::into_address),
            contact: contact.map(ContactRecord::into_contact),
        }
    }

    /// Returns true when this customer carries the given details,
    /// ignoring every generated identifier
    pub fn matches(&self, details: &CustomerDetails) -> bool {
        let address_matches = match (&self.address, &details.address) {
            (Some(address), Some(expected)) => address.matches(expected),
            (None, None) => true,
            _ => false,
        };
        let contact_matches = match (&self.contact, &details.contact) {
            (Some(contact), Some(expected)) => contact.matches(expected),
            (None, None) => true,
            _ => false,
        };

        self.first_name == details.first_name
            && self.last_name == details.last_name
            && self.email == details.email
            && address_matches
            && contact_matches
    }
}

/// Caller-supplied customer data for create and update
///
/// Carries no identifiers: ids are generated by storage on create and taken
/// from the path on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<AddressDetails>,
    pub contact: Option<ContactDetails>,
}

impl CustomerDetails {
    /// Creates details with only the scalar fields set
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            address: None,
            contact: None,
        }
    }

    /// Attaches address details
    pub fn with_address(mut self, address: AddressDetails) -> Self {
        self.address = Some(address);
        self
    }

    /// Attaches contact details
    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.contact = Some(contact);
        self
    }
}
