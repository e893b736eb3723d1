//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each domain aggregate. Repositories encapsulate
//! SQL queries and map between database rows and plain column values.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries mapped with `sqlx::FromRow`
//! - Statements run on a borrowed connection so callers control the transaction
//! - Named constraints surface through `DatabaseError`

pub mod customer;

pub use customer::CustomerRepository;
