//! Storage Adapters for the Customer Domain
//!
//! This module provides adapter implementations of the customer storage port
//! that live alongside the domain. The PostgreSQL adapter lives in `infra_db`.
//!
//! # Available Adapters
//!
//! - **InMemoryCustomerStore**: Process-local tables with the same constraints
//!   as the database schema. Used by tests and by `API_STORAGE=memory`.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use domain_customer::adapters::InMemoryCustomerStore;
//! use domain_customer::{CustomerService, CustomerStore};
//!
//! let store: Arc<dyn CustomerStore> = Arc::new(InMemoryCustomerStore::new());
//! let service = CustomerService::new(store);
//! ```

pub mod memory;

pub use memory::{InMemoryCustomerStore, InMemoryUnitOfWork};
