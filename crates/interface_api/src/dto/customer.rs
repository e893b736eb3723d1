//! Customer DTOs
//!
//! JSON uses camelCase field names. Identifiers are read-only: any `id`
//! sent by a client, top-level or nested, is ignored.

use serde::{Deserialize, Serialize};

use core_kernel::{AddressId, ContactId, CustomerId};
use domain_customer::{
    Address, AddressDetails, AddressType, Contact, ContactDetails, ContactType, Customer,
    CustomerDetails,
};

/// Body of create and update requests
///
/// Missing or null scalar fields become empty strings so that they are
/// reported by field validation rather than as unreadable JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<AddressRequest>,
    pub contact: Option<ContactRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

impl From<CustomerRequest> for CustomerDetails {
    fn from(request: CustomerRequest) -> Self {
        CustomerDetails {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            address: request.address.map(Into::into),
            contact: request.contact.map(Into::into),
        }
    }
}

impl From<AddressRequest> for AddressDetails {
    fn from(request: AddressRequest) -> Self {
        AddressDetails {
            street: request.street,
            city: request.city,
            state: request.state,
            zip: request.zip,
            address_type: request.address_type,
        }
    }
}

impl From<ContactRequest> for ContactDetails {
    fn from(request: ContactRequest) -> Self {
        ContactDetails {
            phone_number: request.phone_number,
            contact_type: request.contact_type,
        }
    }
}

/// A customer as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<AddressResponse>,
    pub contact: Option<ContactResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: AddressId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: ContactId,
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            address: customer.address.map(Into::into),
            contact: customer.contact.map(Into::into),
        }
    }
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        AddressResponse {
            id: address.id,
            street: address.street,
            city: address.city,
            state: address.state,
            zip: address.zip,
            address_type: address.address_type,
        }
    }
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        ContactResponse {
            id: contact.id,
            phone_number: contact.phone_number,
            contact_type: contact.contact_type,
        }
    }
}

/// Body returned after a successful delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCustomerResponse {
    pub message: String,
}

impl DeleteCustomerResponse {
    pub fn for_customer(id: CustomerId) -> Self {
        Self {
            message: format!("Customer deleted successfully with ID: {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_ignores_ids() {
        let request: CustomerRequest = serde_json::from_value(json!({
            "id": 99,
            "firstName": "John",
            "lastName": "Doe",
            "email": "john.doe@example.com",
            "address": { "id": 5, "street": "123 Main St", "addressType": "Home" },
            "contact": { "id": 6, "phoneNumber": "(123) 456-7890", "contactType": "Mobile" }
        }))
        .unwrap();

        let details = CustomerDetails::from(request);
        let address = details.address.unwrap();
        assert_eq!(address.street.as_deref(), Some("123 Main St"));
        assert_eq!(address.city, None);
        assert_eq!(address.address_type, Some(AddressType::Home));
        assert_eq!(details.contact.unwrap().contact_type, Some(ContactType::Mobile));
    }

    #[test]
    fn test_missing_scalars_default_to_empty() {
        let details = CustomerDetails::from(
            serde_json::from_value::<CustomerRequest>(json!({})).unwrap(),
        );
        assert!(details.first_name.is_empty());
        assert!(details.address.is_none());
    }

    #[test]
    fn test_null_scalars_default_to_empty() {
        let request: CustomerRequest = serde_json::from_value(json!({
            "firstName": null,
            "lastName": "Doe",
            "email": null
        }))
        .unwrap();

        let details = CustomerDetails::from(request);
        assert_eq!(details.first_name, "");
        assert_eq!(details.last_name, "Doe");
        assert_eq!(details.email, "");
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let result: Result<CustomerRequest, _> = serde_json::from_value(json!({
            "address": { "addressType": "Castle" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_serializes_null_parts() {
        let response = CustomerResponse {
            id: CustomerId::new(1),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            address: None,
            contact: None,
        };

        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["firstName"], "Jane");
        assert!(value["address"].is_null());
        assert!(value.as_object().unwrap().contains_key("contact"));
    }

    #[test]
    fn test_delete_message() {
        assert_eq!(
            DeleteCustomerResponse::for_customer(CustomerId::new(3)).message,
            "Customer deleted successfully with ID: 3"
        );
    }
}
