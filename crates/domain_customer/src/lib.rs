//! Customer Domain
//!
//! This crate manages customer records. Each customer may own at most one
//! address and one contact; both are created, updated and deleted only as part
//! of a customer mutation.
//!
//! # Aggregate Model
//!
//! - **Customer**: names and a globally unique email
//! - **Address**: free-text postal fields and an optional [`AddressType`]
//! - **Contact**: a globally unique phone number and an optional [`ContactType`]
//!
//! Storage keeps the three as separate rows linked by `customer_id`. The
//! [`CustomerService`] assembles them into [`Customer`] aggregates and applies
//! the partial-update rules.
//!
//! # Examples
//!
//! ```rust
//! use domain_customer::{AddressDetails, AddressType, CustomerDetails, CustomerValidator};
//!
//! let details = CustomerDetails::new("John", "Doe", "john.doe@example.com")
//!     .with_address(AddressDetails::new("123 Main St", "Miami", "FL", "33101", AddressType::Home));
//!
//! assert!(CustomerValidator::validate(&details).is_valid());
//! ```
//!
//! ```rust,ignore
//! let service = CustomerService::new(Arc::new(InMemoryCustomerStore::new()));
//! let created = service.create_customer(details).await?;
//! assert!(created.address.is_some());
//! ```

pub mod address;
pub mod contact;
pub mod customer;
pub mod error;
pub mod validation;
pub mod ports;
pub mod adapters;
pub mod service;

pub use address::{Address, AddressDetails, AddressType};
pub use contact::{Contact, ContactDetails, ContactType};
pub use customer::{Customer, CustomerDetails};
pub use error::CustomerError;
pub use validation::{CustomerValidator, FieldViolation, ValidationResult};
pub use ports::{
    constraints, CustomerStore, CustomerUnitOfWork,
    CustomerRecord, NewCustomer, AddressRecord, NewAddress, ContactRecord, NewContact,
};
pub use adapters::InMemoryCustomerStore;
pub use service::CustomerService;
