//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use serde_json::{json, Value};

use domain_customer::{AddressDetails, ContactDetails, CustomerDetails};

use crate::fixtures::{AddressFixtures, ContactFixtures};

/// Builder for constructing customer payloads
///
/// Defaults to John Doe without an address or contact.
///
/// # Example
///
/// ```rust
/// use test_utils::builders::CustomerDetailsBuilder;
///
/// let details = CustomerDetailsBuilder::new()
///     .with_email("someone@example.com")
///     .with_default_contact()
///     .build();
/// assert!(details.contact.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CustomerDetailsBuilder {
    first_name: String,
    last_name: String,
    email: String,
    address: Option<AddressDetails>,
    contact: Option<ContactDetails>,
}

impl Default for CustomerDetailsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerDetailsBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            address: None,
            contact: None,
        }
    }

    /// Sets the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = name.into();
        self
    }

    /// Sets the last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = name.into();
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the address
    pub fn with_address(mut self, address: AddressDetails) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the Miami home address
    pub fn with_default_address(self) -> Self {
        self.with_address(AddressFixtures::miami_home())
    }

    /// Sets the contact
    pub fn with_contact(mut self, contact: ContactDetails) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Sets the mobile contact
    pub fn with_default_contact(self) -> Self {
        self.with_contact(ContactFixtures::mobile())
    }

    /// Sets only the phone number of the contact
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        let mut contact = self.contact.take().unwrap_or_default();
        contact.phone_number = Some(phone.into());
        self.contact = Some(contact);
        self
    }

    /// Builds the domain payload
    pub fn build(self) -> CustomerDetails {
        CustomerDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            address: self.address,
            contact: self.contact,
        }
    }

    /// Builds the camelCase JSON body accepted by the HTTP API
    pub fn build_json(self) -> Value {
        customer_json(&self.build())
    }
}

/// Renders a customer payload as the camelCase JSON body accepted by the
/// HTTP API
pub fn customer_json(details: &CustomerDetails) -> Value {
    let address = details.address.as_ref().map(|a| {
        json!({
            "street": a.street,
            "city": a.city,
            "state": a.state,
            "zip": a.zip,
            "addressType": a.address_type,
        })
    });
    let contact = details.contact.as_ref().map(|c| {
        json!({
            "phoneNumber": c.phone_number,
            "contactType": c.contact_type,
        })
    });

    json!({
        "firstName": details.first_name,
        "lastName": details.last_name,
        "email": details.email,
        "address": address,
        "contact": contact,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let details = CustomerDetailsBuilder::new().build();

        assert_eq!(details.first_name, "John");
        assert_eq!(details.email, "john.doe@example.com");
        assert!(details.address.is_none());
        assert!(details.contact.is_none());
    }

    #[test]
    fn test_with_phone_creates_contact() {
        let details = CustomerDetailsBuilder::new().with_phone("(999) 111-2222").build();

        let contact = details.contact.unwrap();
        assert_eq!(contact.phone_number.as_deref(), Some("(999) 111-2222"));
        assert_eq!(contact.contact_type, None);
    }

    #[test]
    fn test_build_json_uses_api_field_names() {
        let body = CustomerDetailsBuilder::new()
            .with_default_address()
            .with_default_contact()
            .build_json();

        assert_eq!(body["firstName"], "John");
        assert_eq!(body["address"]["addressType"], "Home");
        assert_eq!(body["contact"]["phoneNumber"], "(123) 456-7890");
        assert_eq!(body["contact"]["contactType"], "Mobile");
    }

    #[test]
    fn test_build_json_omitted_parts_are_null() {
        let body = CustomerDetailsBuilder::new().build_json();
        assert!(body["address"].is_null());
        assert!(body["contact"].is_null());
    }
}
