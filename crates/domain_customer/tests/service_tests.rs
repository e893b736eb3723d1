//! Tests for the customer aggregate service against the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;

use core_kernel::{
    CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use domain_customer::{
    constraints, AddressDetails, AddressType, ContactDetails, ContactType, CustomerDetails,
    CustomerError, CustomerService, CustomerStore, CustomerUnitOfWork, CustomerValidator,
    InMemoryCustomerStore,
};

fn john_doe() -> CustomerDetails {
    CustomerDetails::new("John", "Doe", "john.doe@example.com")
        .with_address(AddressDetails::new("123 Main St", "Miami", "FL", "33101", AddressType::Home))
        .with_contact(ContactDetails::new("(123) 456-7890", ContactType::Mobile))
}

fn setup() -> (CustomerService, InMemoryCustomerStore) {
    let store = InMemoryCustomerStore::new();
    let service = CustomerService::new(Arc::new(store.clone()));
    (service, store)
}

async fn row_counts(store: &InMemoryCustomerStore) -> (usize, usize, usize) {
    let mut uow = store.begin().await.unwrap();
    (
        uow.find_all_customers().await.unwrap().len(),
        uow.find_all_addresses().await.unwrap().len(),
        uow.find_all_contacts().await.unwrap().len(),
    )
}

fn assert_conflict(err: CustomerError, constraint: &str) {
    match err {
        CustomerError::Store(port) => assert_eq!(port.violated_constraint(), Some(constraint)),
        other => panic!("expected storage conflict, got {:?}", other),
    }
}

// ============================================================================
// Read Tests
// ============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_all_on_empty_store() {
        let (service, _) = setup();
        assert!(service.get_all_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_customer() {
        let (service, _) = setup();
        let err = service.get_customer(CustomerId::new(42)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Customer not found with ID: 42");
    }

    #[tokio::test]
    async fn test_get_all_assembles_parts_in_id_order() {
        let (service, _) = setup();
        let first = service.create_customer(john_doe()).await.unwrap();
        let second = service
            .create_customer(CustomerDetails::new("Jane", "Smith", "jane.smith@example.com"))
            .await
            .unwrap();

        let all = service.get_all_customers().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], first);
        assert_eq!(all[1], second);
        assert!(all[1].address.is_none());
        assert!(all[1].contact.is_none());
    }
}

// ============================================================================
// Create Tests
// ============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_links_parts_to_new_customer() {
        let (service, store) = setup();
        let created = service.create_customer(john_doe()).await.unwrap();

        let mut uow = store.begin().await.unwrap();
        let address = uow.find_address_by_customer(created.id).await.unwrap().unwrap();
        let contact = uow.find_contact_by_customer(created.id).await.unwrap().unwrap();
        assert_eq!(address.customer_id, created.id);
        assert_eq!(contact.customer_id, created.id);
        assert_eq!(created.address.map(|a| a.id), Some(address.id));
        assert_eq!(created.contact.map(|c| c.id), Some(contact.id));
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (service, _) = setup();
        let details = john_doe();
        let created = service.create_customer(details.clone()).await.unwrap();

        let fetched = service.get_customer(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.matches(&details));
    }

    #[tokio::test]
    async fn test_create_without_parts() {
        let (service, store) = setup();
        let created = service
            .create_customer(CustomerDetails::new("Jane", "Smith", "jane.smith@example.com"))
            .await
            .unwrap();

        assert!(created.address.is_none());
        assert!(created.contact.is_none());
        assert_eq!(row_counts(&store).await, (1, 0, 0));
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_storage_unchanged() {
        let (service, store) = setup();
        service.create_customer(john_doe()).await.unwrap();

        let duplicate = CustomerDetails::new("Johnny", "Doe", "john.doe@example.com")
            .with_contact(ContactDetails::new("(999) 999-9999", ContactType::Work));
        let err = service.create_customer(duplicate).await.unwrap_err();

        assert_conflict(err, constraints::CUSTOMER_EMAIL_UNIQUE);
        assert_eq!(row_counts(&store).await, (1, 1, 1));
    }

    #[tokio::test]
    async fn test_duplicate_phone_rolls_back_customer_and_address() {
        let (service, store) = setup();
        service.create_customer(john_doe()).await.unwrap();

        let duplicate = CustomerDetails::new("Jane", "Smith", "jane.smith@example.com")
            .with_address(AddressDetails::new("9 Elm St", "Tampa", "FL", "33601", AddressType::Work))
            .with_contact(ContactDetails::new("(123) 456-7890", ContactType::Home));
        let err = service.create_customer(duplicate).await.unwrap_err();

        assert_conflict(err, constraints::CONTACT_PHONE_UNIQUE);
        assert_eq!(row_counts(&store).await, (1, 1, 1));
    }

    #[tokio::test]
    async fn test_invalid_payload_touches_no_storage() {
        let (service, store) = setup();
        let err = service
            .create_customer(CustomerDetails::new("", "Doe", "not-an-email"))
            .await
            .unwrap_err();

        assert_eq!(err.violations().len(), 2);
        assert_eq!(row_counts(&store).await, (0, 0, 0));
    }
}

// ============================================================================
// Update Tests
// ============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_scalars_keeps_omitted_parts() {
        let (service, _) = setup();
        let created = service.create_customer(john_doe()).await.unwrap();

        let updated = service
            .update_customer(
                created.id,
                CustomerDetails::new("Jane", "Smith", "jane.smith@example.com"),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.last_name, "Smith");
        assert_eq!(updated.email, "jane.smith@example.com");
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.contact, created.contact);
        assert_eq!(service.get_customer(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_creates_address_when_absent() {
        let (service, store) = setup();
        let created = service
            .create_customer(CustomerDetails::new("Jane", "Smith", "jane.smith@example.com"))
            .await
            .unwrap();

        let details = CustomerDetails::new("Jane", "Smith", "jane.smith@example.com")
            .with_address(AddressDetails::new("9 Elm St", "Tampa", "FL", "33601", AddressType::Work));
        let updated = service.update_customer(created.id, details).await.unwrap();

        assert!(updated.address.is_some());
        assert_eq!(row_counts(&store).await, (1, 1, 0));
    }

    #[tokio::test]
    async fn test_update_reuses_existing_address_id() {
        let (service, store) = setup();
        let created = service.create_customer(john_doe()).await.unwrap();
        let original_id = created.address.as_ref().map(|a| a.id);

        let details = CustomerDetails::new("John", "Doe", "john.doe@example.com")
            .with_address(AddressDetails {
                street: Some("1 Ocean Dr".to_string()),
                city: None,
                state: Some("FL".to_string()),
                zip: None,
                address_type: Some(AddressType::Other),
            });
        let updated = service.update_customer(created.id, details).await.unwrap();

        let address = updated.address.unwrap();
        assert_eq!(Some(address.id), original_id);
        assert_eq!(address.street.as_deref(), Some("1 Ocean Dr"));
        assert_eq!(address.city, None);
        assert_eq!(address.address_type, Some(AddressType::Other));
        assert_eq!(row_counts(&store).await, (1, 1, 1));
    }

    #[tokio::test]
    async fn test_update_overwrites_contact_in_place() {
        let (service, _) = setup();
        let created = service.create_customer(john_doe()).await.unwrap();

        let details = CustomerDetails::new("John", "Doe", "john.doe@example.com")
            .with_contact(ContactDetails::new("(555) 000-1111", ContactType::Work));
        let updated = service.update_customer(created.id, details).await.unwrap();

        let contact = updated.contact.unwrap();
        assert_eq!(Some(contact.id), created.contact.map(|c| c.id));
        assert_eq!(contact.phone_number.as_deref(), Some("(555) 000-1111"));
        assert_eq!(updated.address, created.address);
    }

    #[tokio::test]
    async fn test_update_missing_customer() {
        let (service, _) = setup();
        let err = service
            .update_customer(CustomerId::new(7), john_doe())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts_and_rolls_back() {
        let (service, _) = setup();
        service.create_customer(john_doe()).await.unwrap();
        let jane = service
            .create_customer(CustomerDetails::new("Jane", "Smith", "jane.smith@example.com"))
            .await
            .unwrap();

        let err = service
            .update_customer(
                jane.id,
                CustomerDetails::new("Janet", "Smith", "john.doe@example.com"),
            )
            .await
            .unwrap_err();

        assert_conflict(err, constraints::CUSTOMER_EMAIL_UNIQUE);
        assert_eq!(service.get_customer(jane.id).await.unwrap(), jane);
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let (service, _) = setup();
        let err = service
            .update_customer(CustomerId::new(7), CustomerDetails::new("J0hn", "Doe", "john.doe@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::ValidationFailed(_)));
    }
}

// ============================================================================
// Delete Tests
// ============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_removes_whole_aggregate() {
        let (service, store) = setup();
        let created = service.create_customer(john_doe()).await.unwrap();

        service.delete_customer(created.id).await.unwrap();

        assert_eq!(row_counts(&store).await, (0, 0, 0));
        assert!(service.get_customer(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_customer() {
        let (service, _) = setup();
        let err = service.delete_customer(CustomerId::new(3)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_email_can_be_reused() {
        let (service, _) = setup();
        let created = service.create_customer(john_doe()).await.unwrap();
        service.delete_customer(created.id).await.unwrap();

        let recreated = service.create_customer(john_doe()).await.unwrap();
        assert_ne!(recreated.id, created.id);
    }
}

// ============================================================================
// Storage Failure Tests
// ============================================================================

mod storage_failure_tests {
    use super::*;

    struct UnavailableStore;

    impl DomainPort for UnavailableStore {}

    #[async_trait]
    impl HealthCheckable for UnavailableStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::unhealthy("unavailable", 0, "down")
        }
    }

    #[async_trait]
    impl CustomerStore for UnavailableStore {
        async fn begin(&self) -> Result<Box<dyn CustomerUnitOfWork>, PortError> {
            Err(PortError::connection("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_storage_errors_propagate_untouched() {
        let service = CustomerService::new(Arc::new(UnavailableStore));

        let err = service.get_all_customers().await.unwrap_err();
        assert!(matches!(err, CustomerError::Store(PortError::Connection { .. })));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn test_alphabetic_names_are_accepted(
        first in "[A-Za-z]{1,20}",
        last in "[A-Za-z]{1,20}",
    ) {
        let details = CustomerDetails::new(first, last, "someone@example.com");
        prop_assert!(CustomerValidator::validate(&details).is_valid());
    }

    #[test]
    fn test_names_with_digits_are_rejected(
        prefix in "[A-Za-z]{0,10}",
        digit in "[0-9]",
        suffix in "[A-Za-z]{0,10}",
    ) {
        let details = CustomerDetails::new(
            format!("{}{}{}", prefix, digit, suffix),
            "Doe",
            "someone@example.com",
        );
        let result = CustomerValidator::validate(&details);
        prop_assert_eq!(result.errors.len(), 1);
        prop_assert_eq!(result.errors[0].field.as_str(), "firstName");
    }

    #[test]
    fn test_well_formed_phone_numbers_are_accepted(
        area in 0u32..1000,
        exchange in 0u32..1000,
        line in 0u32..10000,
    ) {
        let phone = format!("({:03}) {:03}-{:04}", area, exchange, line);
        let details = CustomerDetails::new("John", "Doe", "john@example.com")
            .with_contact(ContactDetails::new(phone, ContactType::Mobile));
        prop_assert!(CustomerValidator::validate(&details).is_valid());
    }
}
