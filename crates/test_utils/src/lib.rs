//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! customer service test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built customer payloads
//! - `builders`: Builder patterns for payloads and JSON request bodies
//! - `database`: PostgreSQL test containers with migrations applied
//! - `assertions`: Custom assertion helpers for customer types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
