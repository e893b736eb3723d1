//! PostgreSQL store tests
//!
//! These tests start a PostgreSQL container and therefore need Docker.
//! Run them with `cargo test -p infra_db -- --ignored`.

use std::sync::Arc;

use core_kernel::{AdapterHealth, CustomerId, HealthCheckable};
use domain_customer::{
    constraints, AddressType, CustomerService, CustomerStore, NewAddress,
    NewContact, NewCustomer,
};
use infra_db::PostgresCustomerStore;
use test_utils::assertions::{
    assert_conflict_on, assert_customer_matches, assert_invalid_fields, assert_not_found,
};
use test_utils::database::{create_isolated_test_database, get_shared_test_database};
use test_utils::fixtures::{jane_smith, john_doe};
use test_utils::TestDatabase;

async fn store() -> (TestDatabase, PostgresCustomerStore) {
    let db = create_isolated_test_database()
        .await
        .expect("Failed to start test database");
    let store = db.customer_store();
    (db, store)
}

fn new_customer(email: &str) -> NewCustomer {
    NewCustomer {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_health_check_reports_healthy() {
    let db = get_shared_test_database().await;
    let store = db.customer_store();
    assert_eq!(store.health_check().await.status, AdapterHealth::Healthy);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_uncommitted_transaction_rolls_back() {
    let (_db, store) = store().await;

    {
        let mut uow = store.begin().await.unwrap();
        uow.insert_customer(new_customer("john@example.com")).await.unwrap();
    }

    let mut uow = store.begin().await.unwrap();
    assert!(uow.find_all_customers().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_constraint_names_are_reported() {
    let (_db, store) = store().await;
    let mut uow = store.begin().await.unwrap();
    let customer = uow.insert_customer(new_customer("john@example.com")).await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = store.begin().await.unwrap();
    let err = uow
        .insert_customer(new_customer("john@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.violated_constraint(), Some(constraints::CUSTOMER_EMAIL_UNIQUE));

    let mut uow = store.begin().await.unwrap();
    let err = uow
        .insert_address(NewAddress {
            customer_id: CustomerId::new(customer.id.get() + 100),
            street: None,
            city: None,
            state: None,
            zip: None,
            address_type: Some(AddressType::Home),
        })
        .await
        .unwrap_err();
    assert_eq!(err.violated_constraint(), Some(constraints::ADDRESS_OWNER_FK));

    let mut uow = store.begin().await.unwrap();
    let contact = NewContact {
        customer_id: customer.id,
        phone_number: Some("(123) 456-7890".to_string()),
        contact_type: None,
    };
    uow.insert_contact(contact.clone()).await.unwrap();
    let err = uow.insert_contact(contact).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_service_round_trip_on_postgres() {
    let (_db, store) = store().await;
    let service = CustomerService::new(Arc::new(store));

    let created = service.create_customer(john_doe()).await.unwrap();
    let fetched = service.get_customer(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_customer_matches(&fetched, &john_doe());

    let updated = service
        .update_customer(created.id, jane_smith())
        .await
        .unwrap();
    assert_eq!(updated.email, "jane.smith@example.com");
    assert_eq!(updated.address, created.address);

    service.delete_customer(created.id).await.unwrap();
    let err = service.get_customer(created.id).await.unwrap_err();
    assert_not_found(&err);
    assert!(service.get_all_customers().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_invalid_payload_never_reaches_database() {
    let (_db, store) = store().await;
    let service = CustomerService::new(Arc::new(store));

    let mut details = john_doe();
    details.first_name = "J0hn".to_string();
    details.email = "not-an-email".to_string();
    let err = service.create_customer(details).await.unwrap_err();

    assert_invalid_fields(&err, &["firstName", "email"]);
    assert!(service.get_all_customers().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_duplicate_phone_rolls_back_whole_create() {
    let (_db, store) = store().await;
    let service = CustomerService::new(Arc::new(store));

    service.create_customer(john_doe()).await.unwrap();

    let mut duplicate = jane_smith();
    duplicate.contact = john_doe().contact;
    let err = service.create_customer(duplicate).await.unwrap_err();

    assert_conflict_on(&err, constraints::CONTACT_PHONE_UNIQUE);
    assert_eq!(service.get_all_customers().await.unwrap().len(), 1);
}
