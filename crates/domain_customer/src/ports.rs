//! Customer Domain Ports
//!
//! This module defines the storage port of the customer domain, enabling
//! swappable implementations (PostgreSQL, in-memory).
//!
//! # Architecture
//!
//! Storage is row-oriented. Customers, addresses and contacts are separate
//! records; an address or contact points at its owner through an explicit
//! `customer_id` foreign key. The service reads and writes these records and
//! assembles [`Customer`](crate::Customer) aggregates from them.
//!
//! Every interaction happens inside a [`CustomerUnitOfWork`] obtained from
//! [`CustomerStore::begin`]. Writes become visible only after
//! [`CustomerUnitOfWork::commit`]; dropping an uncommitted unit of work
//! discards everything it did.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut uow = store.begin().await?;
//! let customer = uow.insert_customer(NewCustomer { .. }).await?;
//! uow.insert_address(NewAddress { customer_id: customer.id, .. }).await?;
//! uow.commit().await?;
//! ```
//!
//! # Errors
//!
//! Unique and foreign-key violations are reported as
//! `PortError::Conflict` carrying the constraint name from [`constraints`].

use async_trait::async_trait;

use core_kernel::{
    AddressId, ContactId, CustomerId, DomainPort, HealthCheckable, PortError,
};

use crate::address::{Address, AddressDetails, AddressType};
use crate::contact::{Contact, ContactDetails, ContactType};

/// Names of the storage constraints guarding the customer tables
///
/// Both adapters report violations under these names so the API layer can
/// tell a duplicate email from any other conflict.
pub mod constraints {
    /// UNIQUE(customers.email)
    pub const CUSTOMER_EMAIL_UNIQUE: &str = "customers_email_key";
    /// UNIQUE(contacts.phone_number)
    pub const CONTACT_PHONE_UNIQUE: &str = "contacts_phone_number_key";
    /// UNIQUE(addresses.customer_id)
    pub const ADDRESS_OWNER_UNIQUE: &str = "addresses_customer_id_key";
    /// UNIQUE(contacts.customer_id)
    pub const CONTACT_OWNER_UNIQUE: &str = "contacts_customer_id_key";
    /// addresses.customer_id REFERENCES customers(id)
    pub const ADDRESS_OWNER_FK: &str = "addresses_customer_id_fkey";
    /// contacts.customer_id REFERENCES customers(id)
    pub const CONTACT_OWNER_FK: &str = "contacts_customer_id_fkey";
}

/// A stored customer row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A customer row that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A stored address row, linked to its owner by `customer_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub id: AddressId,
    pub customer_id: CustomerId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

/// An address row that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub customer_id: CustomerId,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address_type: Option<AddressType>,
}

/// A stored contact row, linked to its owner by `customer_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: ContactId,
    pub customer_id: CustomerId,
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

/// A contact row that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub customer_id: CustomerId,
    pub phone_number: Option<String>,
    pub contact_type: Option<ContactType>,
}

impl AddressRecord {
    /// Drops the owner link, keeping the address fields
    pub fn into_address(self) -> Address {
        Address {
            id: self.id,
            street: self.street,
            city: self.city,
            state: self.state,
            zip: self.zip,
            address_type: self.address_type,
        }
    }

    /// Overwrites every address field in place; id and owner are preserved
    pub fn apply(&mut self, details: AddressDetails) {
        self.street = details.street;
        self.city = details.city;
        self.state = details.state;
        self.zip = details.zip;
        self.address_type = details.address_type;
    }
}

impl NewAddress {
    /// Builds a row for `customer_id` from caller-supplied details
    pub fn owned_by(customer_id: CustomerId, details: AddressDetails) -> Self {
        Self {
            customer_id,
            street: details.street,
            city: details.city,
            state: details.state,
            zip: details.zip,
            address_type: details.address_type,
        }
    }
}

impl ContactRecord {
    /// Drops the owner link, keeping the contact fields
    pub fn into_contact(self) -> Contact {
        Contact {
            id: self.id,
            phone_number: self.phone_number,
            contact_type: self.contact_type,
        }
    }

    /// Overwrites every contact field in place; id and owner are preserved
    pub fn apply(&mut self, details: ContactDetails) {
        self.phone_number = details.phone_number;
        self.contact_type = details.contact_type;
    }
}

impl NewContact {
    /// Builds a row for `customer_id` from caller-supplied details
    pub fn owned_by(customer_id: CustomerId, details: ContactDetails) -> Self {
        Self {
            customer_id,
            phone_number: details.phone_number,
            contact_type: details.contact_type,
        }
    }
}

/// Entry point of the customer storage port
///
/// Implementations must be cheap to share behind an `Arc` and safe to use
/// from many concurrent requests; isolation between requests is provided by
/// the units of work they hand out.
#[async_trait]
pub trait CustomerStore: DomainPort + HealthCheckable {
    /// Opens a new atomic unit of work
    ///
    /// # Returns
    ///
    /// A boxed unit of work; it rolls back unless committed
    async fn begin(&self) -> Result<Box<dyn CustomerUnitOfWork>, PortError>;
}

/// A single atomic interaction with customer storage
///
/// All reads observe the writes made earlier in the same unit of work.
#[async_trait]
pub trait CustomerUnitOfWork: Send {
    // ========================================================================
    // Customers
    // ========================================================================

    /// Retrieves a customer row by ID
    async fn find_customer(&mut self, id: CustomerId) -> Result<Option<CustomerRecord>, PortError>;

    /// Retrieves every customer row, ordered by ID
    async fn find_all_customers(&mut self) -> Result<Vec<CustomerRecord>, PortError>;

    /// Stores a new customer row and returns it with its generated ID
    ///
    /// Fails with a `customers_email_key` conflict if the email is taken.
    async fn insert_customer(&mut self, customer: NewCustomer) -> Result<CustomerRecord, PortError>;

    /// Overwrites an existing customer row
    async fn update_customer(&mut self, customer: CustomerRecord) -> Result<CustomerRecord, PortError>;

    /// Deletes a customer row
    ///
    /// Storage also removes any address or contact still pointing at it.
    async fn delete_customer(&mut self, id: CustomerId) -> Result<(), PortError>;

    // ========================================================================
    // Addresses
    // ========================================================================

    /// Retrieves an address row by ID
    async fn find_address(&mut self, id: AddressId) -> Result<Option<AddressRecord>, PortError>;

    /// Retrieves the address owned by a customer, if any
    async fn find_address_by_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<AddressRecord>, PortError>;

    /// Retrieves every address row, ordered by ID
    async fn find_all_addresses(&mut self) -> Result<Vec<AddressRecord>, PortError>;

    /// Stores a new address row and returns it with its generated ID
    async fn insert_address(&mut self, address: NewAddress) -> Result<AddressRecord, PortError>;

    /// Overwrites an existing address row
    async fn update_address(&mut self, address: AddressRecord) -> Result<AddressRecord, PortError>;

    /// Deletes an address row
    async fn delete_address(&mut self, id: AddressId) -> Result<(), PortError>;

    // ========================================================================
    // Contacts
    // ========================================================================

    /// Retrieves a contact row by ID
    async fn find_contact(&mut self, id: ContactId) -> Result<Option<ContactRecord>, PortError>;

    /// Retrieves the contact owned by a customer, if any
    async fn find_contact_by_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<ContactRecord>, PortError>;

    /// Retrieves every contact row, ordered by ID
    async fn find_all_contacts(&mut self) -> Result<Vec<ContactRecord>, PortError>;

    /// Stores a new contact row and returns it with its generated ID
    ///
    /// Fails with a `contacts_phone_number_key` conflict if the number is taken.
    async fn insert_contact(&mut self, contact: NewContact) -> Result<ContactRecord, PortError>;

    /// Overwrites an existing contact row
    async fn update_contact(&mut self, contact: ContactRecord) -> Result<ContactRecord, PortError>;

    /// Deletes a contact row
    async fn delete_contact(&mut self, id: ContactId) -> Result<(), PortError>;

    // ========================================================================
    // Completion
    // ========================================================================

    /// Makes every write of this unit of work durable and visible
    async fn commit(self: Box<Self>) -> Result<(), PortError>;
}
