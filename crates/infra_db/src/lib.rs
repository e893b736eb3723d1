//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL infrastructure for the customer service
//! using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access abstractions
//! that hide the database implementation details from the domain layer:
//!
//! - [`repositories`]: SQL statements over the `customers`, `addresses` and
//!   `contacts` tables
//! - [`adapters`]: the `CustomerStore` port implemented on top of a
//!   transaction per unit of work
//! - [`pool`]: connection pool configuration and schema migrations
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresCustomerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/customers")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresCustomerStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresCustomerStore;
