//! Core Kernel - Foundational types shared by the customer service crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly-typed integer identifiers for customers and their owned parts
//! - Port infrastructure (errors, health checks) for storage adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{CustomerId, AddressId, ContactId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
