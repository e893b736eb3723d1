//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain records and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::CustomerStore;
//!
//! let store = PostgresCustomerStore::new(pool);
//! let mut uow = store.begin().await?;
//! let customers = uow.find_all_customers().await?;
//! ```

pub mod customer;

pub use customer::{PostgresCustomerStore, PostgresUnitOfWork};
