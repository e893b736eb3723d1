//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for customer types that give
//! more meaningful error messages than standard assertions.

use core_kernel::PortError;
use domain_customer::{Customer, CustomerDetails, CustomerError};

/// Asserts that a stored customer carries the given payload, ignoring ids
///
/// # Panics
///
/// Panics with both values printed if any field differs
pub fn assert_customer_matches(actual: &Customer, expected: &CustomerDetails) {
    assert!(
        actual.matches(expected),
        "Customer does not match payload:\n  actual:   {:?}\n  expected: {:?}",
        actual,
        expected
    );
}

/// Asserts that an error is a storage conflict on the named constraint
pub fn assert_conflict_on(error: &CustomerError, constraint: &str) {
    match error {
        CustomerError::Store(port @ PortError::Conflict { .. }) => assert_eq!(
            port.violated_constraint(),
            Some(constraint),
            "Conflict on unexpected constraint: {}",
            port
        ),
        other => panic!("Expected conflict on {}, got {:?}", constraint, other),
    }
}

/// Asserts that an error is a validation failure naming exactly these fields
pub fn assert_invalid_fields(error: &CustomerError, fields: &[&str]) {
    let actual: Vec<&str> = error.violations().iter().map(|v| v.field.as_str()).collect();
    assert!(
        matches!(error, CustomerError::ValidationFailed(_)),
        "Expected validation failure, got {:?}",
        error
    );
    assert_eq!(actual, fields, "Unexpected set of invalid fields");
}

/// Asserts that an error means the customer was not found
pub fn assert_not_found(error: &CustomerError) {
    assert!(error.is_not_found(), "Expected not found, got {:?}", error);
}
