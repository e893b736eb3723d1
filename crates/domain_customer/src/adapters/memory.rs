//! In-Memory Customer Store
//!
//! This module provides a storage adapter that keeps customer, address and
//! contact rows in process memory. It enforces the same named constraints as
//! the PostgreSQL schema, so service behavior (including conflict reporting)
//! is identical against either adapter.
//!
//! # Isolation
//!
//! A unit of work takes the table lock when it begins and keeps it until it
//! is committed or dropped. Writes go to a private copy of the tables, which
//! replaces the shared tables on commit. Units of work are therefore fully
//! serialized; dropping one without committing leaves storage untouched.
//!
//! Identifiers are allocated from per-table counters starting at 1.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use core_kernel::{
    AddressId, ContactId, CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::ports::{
    constraints, AddressRecord, ContactRecord, CustomerRecord, CustomerStore, CustomerUnitOfWork,
    NewAddress, NewContact, NewCustomer,
};

const ADAPTER_ID: &str = "in-memory-customer-store";

#[derive(Debug, Clone, Default)]
struct Tables {
    customers: BTreeMap<CustomerId, CustomerRecord>,
    addresses: BTreeMap<AddressId, AddressRecord>,
    contacts: BTreeMap<ContactId, ContactRecord>,
    last_customer_id: i64,
    last_address_id: i64,
    last_contact_id: i64,
}

/// In-memory implementation of [`CustomerStore`]
///
/// Cloning the store shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCustomerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryCustomerStore {}

#[async_trait]
impl HealthCheckable for InMemoryCustomerStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy(ADAPTER_ID, 0)
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn begin(&self) -> Result<Box<dyn CustomerUnitOfWork>, PortError> {
        let guard = self.tables.clone().lock_owned().await;
        let working = (*guard).clone();
        debug!("Began in-memory unit of work");
        Ok(Box::new(InMemoryUnitOfWork { guard, working }))
    }
}

/// Unit of work over [`InMemoryCustomerStore`]
pub struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

fn unique_violation(constraint: &str) -> PortError {
    PortError::constraint_violation(
        constraint,
        format!("duplicate key value violates unique constraint \"{}\"", constraint),
    )
}

fn foreign_key_violation(constraint: &str, customer_id: CustomerId) -> PortError {
    PortError::constraint_violation(
        constraint,
        format!(
            "insert or update violates foreign key constraint \"{}\": customer {} does not exist",
            constraint, customer_id
        ),
    )
}

impl Tables {
    fn check_customer_email(&self, email: &str, exclude: Option<CustomerId>) -> Result<(), PortError> {
        let taken = self
            .customers
            .values()
            .any(|c| c.email == email && Some(c.id) != exclude);
        if taken {
            return Err(unique_violation(constraints::CUSTOMER_EMAIL_UNIQUE));
        }
        Ok(())
    }

    fn check_address_owner(&self, customer_id: CustomerId, exclude: Option<AddressId>) -> Result<(), PortError> {
        if !self.customers.contains_key(&customer_id) {
            return Err(foreign_key_violation(constraints::ADDRESS_OWNER_FK, customer_id));
        }
        let taken = self
            .addresses
            .values()
            .any(|a| a.customer_id == customer_id && Some(a.id) != exclude);
        if taken {
            return Err(unique_violation(constraints::ADDRESS_OWNER_UNIQUE));
        }
        Ok(())
    }

    fn check_contact(
        &self,
        customer_id: CustomerId,
        phone_number: Option<&str>,
        exclude: Option<ContactId>,
    ) -> Result<(), PortError> {
        if !self.customers.contains_key(&customer_id) {
            return Err(foreign_key_violation(constraints::CONTACT_OWNER_FK, customer_id));
        }
        let others = || self.contacts.values().filter(|c| Some(c.id) != exclude);
        if others().any(|c| c.customer_id == customer_id) {
            return Err(unique_violation(constraints::CONTACT_OWNER_UNIQUE));
        }
        if let Some(phone_number) = phone_number {
            if others().any(|c| c.phone_number.as_deref() == Some(phone_number)) {
                return Err(unique_violation(constraints::CONTACT_PHONE_UNIQUE));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerUnitOfWork for InMemoryUnitOfWork {
    async fn find_customer(&mut self, id: CustomerId) -> Result<Option<CustomerRecord>, PortError> {
        Ok(self.working.customers.get(&id).cloned())
    }

    async fn find_all_customers(&mut self) -> Result<Vec<CustomerRecord>, PortError> {
        Ok(self.working.customers.values().cloned().collect())
    }

    async fn insert_customer(&mut self, customer: NewCustomer) -> Result<CustomerRecord, PortError> {
        self.working.check_customer_email(&customer.email, None)?;

        self.working.last_customer_id += 1;
        let record = CustomerRecord {
            id: CustomerId::new(self.working.last_customer_id),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        };
        self.working.customers.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_customer(&mut self, customer: CustomerRecord) -> Result<CustomerRecord, PortError> {
        if !self.working.customers.contains_key(&customer.id) {
            return Err(PortError::not_found(CustomerId::entity(), customer.id));
        }
        self.working.check_customer_email(&customer.email, Some(customer.id))?;

        self.working.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn delete_customer(&mut self, id: CustomerId) -> Result<(), PortError> {
        if self.working.customers.remove(&id).is_none() {
            return Err(PortError::not_found(CustomerId::entity(), id));
        }
        // ON DELETE CASCADE
        self.working.addresses.retain(|_, a| a.customer_id != id);
        self.working.contacts.retain(|_, c| c.customer_id != id);
        Ok(())
    }

    async fn find_address(&mut self, id: AddressId) -> Result<Option<AddressRecord>, PortError> {
        Ok(self.working.addresses.get(&id).cloned())
    }

    async fn find_address_by_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, PortError> {
        Ok(self
            .working
            .addresses
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn find_all_addresses(&mut self) -> Result<Vec<AddressRecord>, PortError> {
        Ok(self.working.addresses.values().cloned().collect())
    }

    async fn insert_address(&mut self, address: NewAddress) -> Result<AddressRecord, PortError> {
        self.working.check_address_owner(address.customer_id, None)?;

        self.working.last_address_id += 1;
        let record = AddressRecord {
            id: AddressId::new(self.working.last_address_id),
            customer_id: address.customer_id,
            street: address.street,
            city: address.city,
            state: address.state,
            zip: address.zip,
            address_type: address.address_type,
        };
        self.working.addresses.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_address(&mut self, address: AddressRecord) -> Result<AddressRecord, PortError> {
        if !self.working.addresses.contains_key(&address.id) {
            return Err(PortError::not_found(AddressId::entity(), address.id));
        }
        self.working.check_address_owner(address.customer_id, Some(address.id))?;

        self.working.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn delete_address(&mut self, id: AddressId) -> Result<(), PortError> {
        self.working
            .addresses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found(AddressId::entity(), id))
    }

    async fn find_contact(&mut self, id: ContactId) -> Result<Option<ContactRecord>, PortError> {
        Ok(self.working.contacts.get(&id).cloned())
    }

    async fn find_contact_by_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<ContactRecord>, PortError> {
        Ok(self
            .working
            .contacts
            .values()
            .find(|c| c.customer_id == customer_id)
            .cloned())
    }

    async fn find_all_contacts(&mut self) -> Result<Vec<ContactRecord>, PortError> {
        Ok(self.working.contacts.values().cloned().collect())
    }

    async fn insert_contact(&mut self, contact: NewContact) -> Result<ContactRecord, PortError> {
        self.working
            .check_contact(contact.customer_id, contact.phone_number.as_deref(), None)?;

        self.working.last_contact_id += 1;
        let record = ContactRecord {
            id: ContactId::new(self.working.last_contact_id),
            customer_id: contact.customer_id,
            phone_number: contact.phone_number,
            contact_type: contact.contact_type,
        };
        self.working.contacts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_contact(&mut self, contact: ContactRecord) -> Result<ContactRecord, PortError> {
        if !self.working.contacts.contains_key(&contact.id) {
            return Err(PortError::not_found(ContactId::entity(), contact.id));
        }
        self.working.check_contact(
            contact.customer_id,
            contact.phone_number.as_deref(),
            Some(contact.id),
        )?;

        self.working.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn delete_contact(&mut self, id: ContactId) -> Result<(), PortError> {
        self.working
            .contacts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found(ContactId::entity(), id))
    }

    async fn commit(self: Box<Self>) -> Result<(), PortError> {
        let InMemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        debug!("Committed in-memory unit of work");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressType;
    use crate::contact::ContactType;
    use core_kernel::AdapterHealth;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
        }
    }

    fn new_address(customer_id: CustomerId) -> NewAddress {
        NewAddress {
            customer_id,
            street: Some("123 Main St".to_string()),
            city: Some("Miami".to_string()),
            state: Some("FL".to_string()),
            zip: Some("33101".to_string()),
            address_type: Some(AddressType::Home),
        }
    }

    fn new_contact(customer_id: CustomerId, phone: &str) -> NewContact {
        NewContact {
            customer_id,
            phone_number: Some(phone.to_string()),
            contact_type: Some(ContactType::Mobile),
        }
    }

    #[tokio::test]
    async fn test_committed_writes_are_visible() {
        let store = InMemoryCustomerStore::new();

        let mut uow = store.begin().await.unwrap();
        let customer = uow.insert_customer(new_customer("john@example.com")).await.unwrap();
        assert_eq!(customer.id, CustomerId::new(1));
        uow.commit().await.unwrap();

        let mut uow = store.begin().await.unwrap();
        let found = uow.find_customer(customer.id).await.unwrap();
        assert_eq!(found, Some(customer));
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_rolls_back() {
        let store = InMemoryCustomerStore::new();

        {
            let mut uow = store.begin().await.unwrap();
            uow.insert_customer(new_customer("john@example.com")).await.unwrap();
        }

        let mut uow = store.begin().await.unwrap();
        assert!(uow.find_all_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_named_conflict() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();
        uow.insert_customer(new_customer("john@example.com")).await.unwrap();

        let err = uow.insert_customer(new_customer("john@example.com")).await.unwrap_err();
        assert_eq!(err.violated_constraint(), Some(constraints::CUSTOMER_EMAIL_UNIQUE));
    }

    #[tokio::test]
    async fn test_update_may_keep_own_email() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();
        let mut customer = uow.insert_customer(new_customer("john@example.com")).await.unwrap();

        customer.first_name = "Johnny".to_string();
        let updated = uow.update_customer(customer).await.unwrap();
        assert_eq!(updated.first_name, "Johnny");
    }

    #[tokio::test]
    async fn test_address_requires_existing_owner() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();

        let err = uow.insert_address(new_address(CustomerId::new(99))).await.unwrap_err();
        assert_eq!(err.violated_constraint(), Some(constraints::ADDRESS_OWNER_FK));
    }

    #[tokio::test]
    async fn test_one_address_per_customer() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();
        let customer = uow.insert_customer(new_customer("john@example.com")).await.unwrap();

        uow.insert_address(new_address(customer.id)).await.unwrap();
        let err = uow.insert_address(new_address(customer.id)).await.unwrap_err();
        assert_eq!(err.violated_constraint(), Some(constraints::ADDRESS_OWNER_UNIQUE));
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_a_named_conflict() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();
        let first = uow.insert_customer(new_customer("a@example.com")).await.unwrap();
        let second = uow.insert_customer(new_customer("b@example.com")).await.unwrap();

        uow.insert_contact(new_contact(first.id, "(123) 456-7890")).await.unwrap();
        let err = uow
            .insert_contact(new_contact(second.id, "(123) 456-7890"))
            .await
            .unwrap_err();
        assert_eq!(err.violated_constraint(), Some(constraints::CONTACT_PHONE_UNIQUE));
    }

    #[tokio::test]
    async fn test_delete_customer_cascades_to_parts() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();
        let customer = uow.insert_customer(new_customer("john@example.com")).await.unwrap();
        uow.insert_address(new_address(customer.id)).await.unwrap();
        uow.insert_contact(new_contact(customer.id, "(123) 456-7890")).await.unwrap();

        uow.delete_customer(customer.id).await.unwrap();

        assert!(uow.find_all_addresses().await.unwrap().is_empty());
        assert!(uow.find_all_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_rows_is_not_found() {
        let store = InMemoryCustomerStore::new();
        let mut uow = store.begin().await.unwrap();

        assert!(uow.delete_customer(CustomerId::new(1)).await.unwrap_err().is_not_found());
        assert!(uow.delete_address(AddressId::new(1)).await.unwrap_err().is_not_found());
        assert!(uow.delete_contact(ContactId::new(1)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = InMemoryCustomerStore::new();
        let result = store.health_check().await;
        assert_eq!(result.status, AdapterHealth::Healthy);
    }
}
