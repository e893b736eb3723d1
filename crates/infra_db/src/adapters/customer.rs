//! PostgreSQL Customer Adapter
//!
//! This module provides the database adapter for the customer domain,
//! implementing the `CustomerStore` port on top of the `CustomerRepository`.
//!
//! # Overview
//!
//! Each unit of work handed out by [`PostgresCustomerStore`] owns a SQLx
//! transaction. Every statement of the unit runs on that transaction; the
//! transaction commits on [`CustomerUnitOfWork::commit`] and rolls back when
//! the unit of work is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::{CustomerService, CustomerStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn CustomerStore> = Arc::new(PostgresCustomerStore::new(pool));
//! let service = CustomerService::new(store);
//! ```

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use core_kernel::{
    AddressId, ContactId, CustomerId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_customer::{
    AddressRecord, AddressType, ContactRecord, ContactType, CustomerRecord, CustomerStore,
    CustomerUnitOfWork, NewAddress, NewContact, NewCustomer,
};

use crate::error::DatabaseError;
use crate::repositories::customer::{
    AddressRow, AddressType as DbAddressType, ContactRow, ContactType as DbContactType,
    CustomerRepository, CustomerRow, NewAddressRow, NewContactRow,
};

const ADAPTER_ID: &str = "postgres-customer-store";

/// PostgreSQL-backed implementation of the `CustomerStore` port
///
/// # Health Checking
///
/// Health checks run `SELECT 1` on the pool to verify the database is
/// reachable.
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants; constraint
/// violations keep the PostgreSQL constraint name.
#[derive(Debug, Clone)]
pub struct PostgresCustomerStore {
    pool: PgPool,
}

impl PostgresCustomerStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl DomainPort for PostgresCustomerStore {}

#[async_trait]
impl HealthCheckable for PostgresCustomerStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(
                ADAPTER_ID,
                latency_ms,
                format!("Database error: {}", e),
            ),
        }
    }
}

#[async_trait]
impl CustomerStore for PostgresCustomerStore {
    async fn begin(&self) -> Result<Box<dyn CustomerUnitOfWork>, PortError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        debug!("Began database transaction");
        Ok(Box::new(PostgresUnitOfWork { tx }))
    }
}

/// Unit of work over one PostgreSQL transaction
pub struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl PostgresUnitOfWork {
    fn repository(&mut self) -> CustomerRepository<'_> {
        CustomerRepository::new(&mut self.tx)
    }
}

#[async_trait]
impl CustomerUnitOfWork for PostgresUnitOfWork {
    #[instrument(level = "debug", skip(self))]
    async fn find_customer(&mut self, id: CustomerId) -> Result<Option<CustomerRecord>, PortError> {
        let row = self.repository().find_customer(id.get()).await?;
        Ok(row.map(customer_record))
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_all_customers(&mut self) -> Result<Vec<CustomerRecord>, PortError> {
        let rows = self.repository().find_all_customers().await?;
        Ok(rows.into_iter().map(customer_record).collect())
    }

    #[instrument(level = "debug", skip(self, customer))]
    async fn insert_customer(&mut self, customer: NewCustomer) -> Result<CustomerRecord, PortError> {
        let row = self
            .repository()
            .insert_customer(&customer.first_name, &customer.last_name, &customer.email)
            .await?;
        Ok(customer_record(row))
    }

    #[instrument(level = "debug", skip(self, customer), fields(customer_id = %customer.id))]
    async fn update_customer(&mut self, customer: CustomerRecord) -> Result<CustomerRecord, PortError> {
        let row = CustomerRow {
            id: customer.id.get(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        };
        let row = self.repository().update_customer(&row).await?;
        Ok(customer_record(row))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_customer(&mut self, id: CustomerId) -> Result<(), PortError> {
        self.repository().delete_customer(id.get()).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_address(&mut self, id: AddressId) -> Result<Option<AddressRecord>, PortError> {
        let row = self.repository().find_address(id.get()).await?;
        Ok(row.map(address_record))
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_address_by_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, PortError> {
        let row = self
            .repository()
            .find_address_by_customer(customer_id.get())
            .await?;
        Ok(row.map(address_record))
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_all_addresses(&mut self) -> Result<Vec<AddressRecord>, PortError> {
        let rows = self.repository().find_all_addresses().await?;
        Ok(rows.into_iter().map(address_record).collect())
    }

    #[instrument(level = "debug", skip(self, address), fields(customer_id = %address.customer_id))]
    async fn insert_address(&mut self, address: NewAddress) -> Result<AddressRecord, PortError> {
        let row = NewAddressRow {
            customer_id: address.customer_id.get(),
            street: address.street,
            city: address.city,
            state: address.state,
            zip: address.zip,
            address_type: address.address_type.map(DbAddressType::from),
        };
        let row = self.repository().insert_address(&row).await?;
        Ok(address_record(row))
    }

    #[instrument(level = "debug", skip(self, address), fields(address_id = %address.id))]
    async fn update_address(&mut self, address: AddressRecord) -> Result<AddressRecord, PortError> {
        let row = AddressRow {
            id: address.id.get(),
            customer_id: address.customer_id.get(),
            street: address.street,
            city: address.city,
            state: address.state,
            zip: address.zip,
            address_type: address.address_type.map(DbAddressType::from),
        };
        let row = self.repository().update_address(&row).await?;
        Ok(address_record(row))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_address(&mut self, id: AddressId) -> Result<(), PortError> {
        self.repository().delete_address(id.get()).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_contact(&mut self, id: ContactId) -> Result<Option<ContactRecord>, PortError> {
        let row = self.repository().find_contact(id.get()).await?;
        Ok(row.map(contact_record))
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_contact_by_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<ContactRecord>, PortError> {
        let row = self
            .repository()
            .find_contact_by_customer(customer_id.get())
            .await?;
        Ok(row.map(contact_record))
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_all_contacts(&mut self) -> Result<Vec<ContactRecord>, PortError> {
        let rows = self.repository().find_all_contacts().await?;
        Ok(rows.into_iter().map(contact_record).collect())
    }

    #[instrument(level = "debug", skip(self, contact), fields(customer_id = %contact.customer_id))]
    async fn insert_contact(&mut self, contact: NewContact) -> Result<ContactRecord, PortError> {
        let row = NewContactRow {
            customer_id: contact.customer_id.get(),
            phone_number: contact.phone_number,
            contact_type: contact.contact_type.map(DbContactType::from),
        };
        let row = self.repository().insert_contact(&row).await?;
        Ok(contact_record(row))
    }

    #[instrument(level = "debug", skip(self, contact), fields(contact_id = %contact.id))]
    async fn update_contact(&mut self, contact: ContactRecord) -> Result<ContactRecord, PortError> {
        let row = ContactRow {
            id: contact.id.get(),
            customer_id: contact.customer_id.get(),
            phone_number: contact.phone_number,
            contact_type: contact.contact_type.map(DbContactType::from),
        };
        let row = self.repository().update_contact(&row).await?;
        Ok(contact_record(row))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_contact(&mut self, id: ContactId) -> Result<(), PortError> {
        self.repository().delete_contact(id.get()).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PortError> {
        let uow = *self;
        uow.tx
            .commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        debug!("Committed database transaction");
        Ok(())
    }
}

// ============================================================================
// Type Conversions
// ============================================================================

fn customer_record(row: CustomerRow) -> CustomerRecord {
    CustomerRecord {
        id: CustomerId::new(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
    }
}

fn address_record(row: AddressRow) -> AddressRecord {
    AddressRecord {
        id: AddressId::new(row.id),
        customer_id: CustomerId::new(row.customer_id),
        street: row.street,
        city: row.city,
        state: row.state,
        zip: row.zip,
        address_type: row.address_type.map(AddressType::from),
    }
}

fn contact_record(row: ContactRow) -> ContactRecord {
    ContactRecord {
        id: ContactId::new(row.id),
        customer_id: CustomerId::new(row.customer_id),
        phone_number: row.phone_number,
        contact_type: row.contact_type.map(ContactType::from),
    }
}

impl From<AddressType> for DbAddressType {
    fn from(value: AddressType) -> Self {
        match value {
            AddressType::Home => DbAddressType::Home,
            AddressType::Work => DbAddressType::Work,
            AddressType::Other => DbAddressType::Other,
        }
    }
}

impl From<DbAddressType> for AddressType {
    fn from(value: DbAddressType) -> Self {
        match value {
            DbAddressType::Home => AddressType::Home,
            DbAddressType::Work => AddressType::Work,
            DbAddressType::Other => AddressType::Other,
        }
    }
}

impl From<ContactType> for DbContactType {
    fn from(value: ContactType) -> Self {
        match value {
            ContactType::Mobile => DbContactType::Mobile,
            ContactType::Home => DbContactType::Home,
            ContactType::Work => DbContactType::Work,
        }
    }
}

impl From<DbContactType> for ContactType {
    fn from(value: DbContactType) -> Self {
        match value {
            DbContactType::Mobile => ContactType::Mobile,
            DbContactType::Home => ContactType::Home,
            DbContactType::Work => ContactType::Work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_row_maps_to_record() {
        let record = address_record(AddressRow {
            id: 3,
            customer_id: 1,
            street: Some("123 Main St".to_string()),
            city: None,
            state: Some("FL".to_string()),
            zip: None,
            address_type: Some(DbAddressType::Work),
        });

        assert_eq!(record.id, AddressId::new(3));
        assert_eq!(record.customer_id, CustomerId::new(1));
        assert_eq!(record.address_type, Some(AddressType::Work));
    }

    #[test]
    fn test_contact_type_round_trips_through_db_enum() {
        for kind in [ContactType::Mobile, ContactType::Home, ContactType::Work] {
            assert_eq!(ContactType::from(DbContactType::from(kind)), kind);
        }
    }
}
