//! Customer domain errors
//!
//! The service raises `NotFound`, `ValidationFailed` and `IllegalState` itself.
//! Storage failures are never inspected here: they travel unchanged inside
//! `Store` so the API boundary can classify them in one place.

use thiserror::Error;

use core_kernel::{CustomerId, PortError};

use crate::validation::FieldViolation;

/// Errors that can occur in the customer domain
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Customer with the given ID was not found
    #[error("Customer not found with ID: {0}")]
    NotFound(CustomerId),

    /// One or more fields failed validation
    #[error("{}", FieldViolation::join(.0))]
    ValidationFailed(Vec<FieldViolation>),

    /// A business precondition did not hold
    #[error("{0}")]
    IllegalState(String),

    /// The storage port reported a failure
    #[error(transparent)]
    Store(#[from] PortError),
}

impl CustomerError {
    /// Creates an IllegalState error with a message
    pub fn illegal_state(message: impl Into<String>) -> Self {
        CustomerError::IllegalState(message.into())
    }

    /// Returns true if this error means the customer does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CustomerError::NotFound(_))
    }

    /// Returns the field violations carried by a validation failure
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            CustomerError::ValidationFailed(violations) => violations,
            _ => &[],
        }
    }
}
