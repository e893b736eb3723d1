//! Pre-built Test Fixtures
//!
//! Provides ready-to-use customer payloads shared by the test suites.
//! These fixtures are designed to be consistent and predictable.

use domain_customer::{
    AddressDetails, AddressType, ContactDetails, ContactType, CustomerDetails,
};

/// John Doe with a home address in Miami and a mobile contact
pub fn john_doe() -> CustomerDetails {
    CustomerDetails::new("John", "Doe", "john.doe@example.com")
        .with_address(AddressFixtures::miami_home())
        .with_contact(ContactFixtures::mobile())
}

/// Jane Smith with no address and no contact
pub fn jane_smith() -> CustomerDetails {
    CustomerDetails::new("Jane", "Smith", "jane.smith@example.com")
}

/// Fixture for address test data
pub struct AddressFixtures;

impl AddressFixtures {
    /// 123 Main St, Miami, FL 33101 (Home)
    pub fn miami_home() -> AddressDetails {
        AddressDetails::new("123 Main St", "Miami", "FL", "33101", AddressType::Home)
    }

    /// 9 Elm St, Tampa, FL 33601 (Work)
    pub fn tampa_work() -> AddressDetails {
        AddressDetails::new("9 Elm St", "Tampa", "FL", "33601", AddressType::Work)
    }

    /// An address with every field null
    pub fn empty() -> AddressDetails {
        AddressDetails::default()
    }
}

/// Fixture for contact test data
pub struct ContactFixtures;

impl ContactFixtures {
    /// (123) 456-7890 (Mobile)
    pub fn mobile() -> ContactDetails {
        ContactDetails::new("(123) 456-7890", ContactType::Mobile)
    }

    /// (555) 000-1111 (Work)
    pub fn work() -> ContactDetails {
        ContactDetails::new("(555) 000-1111", ContactType::Work)
    }

    /// A phone number that fails the `(###) ###-####` format
    pub fn malformed() -> ContactDetails {
        ContactDetails::new("555-1234", ContactType::Home)
    }
}
