//! Customer validation rules
//!
//! Field checks run before any storage call and collect every violation
//! instead of stopping at the first one.
//!
//! # Validation Rules
//!
//! ## Customer
//! - `firstName`, `lastName`: mandatory, ASCII letters only
//! - `email`: mandatory, valid email syntax, at most 50 characters
//!
//! ## Contact
//! - `phoneNumber`: when present, must look like `(###) ###-####`
//!
//! Address fields are free text and carry no rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::contact::ContactDetails;
use crate::customer::CustomerDetails;
use crate::error::CustomerError;

/// Maximum accepted email length, in characters
pub const EMAIL_MAX_LENGTH: usize = 50;

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// API name of the offending field (`contact.phoneNumber` for nested fields)
    pub field: String,
    /// Human-readable description of the rule that failed
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Joins violations into a single `field: message, field: message` line
    pub fn join(violations: &[FieldViolation]) -> String {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of customer validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors, in field order
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Returns true when no rule was violated
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(FieldViolation::new(field, message));
    }

    /// Converts the result into a domain error if any rule was violated
    pub fn into_result(self) -> Result<(), CustomerError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CustomerError::ValidationFailed(self.errors))
        }
    }
}

/// Validator for customer create and update payloads
///
/// # Examples
///
/// ```rust
/// use domain_customer::{CustomerDetails, CustomerValidator};
///
/// let details = CustomerDetails::new("John", "Doe", "john.doe@example.com");
/// assert!(CustomerValidator::validate(&details).is_valid());
///
/// let details = CustomerDetails::new("J0hn", "", "john.doe@example.com");
/// let result = CustomerValidator::validate(&details);
/// assert_eq!(result.errors.len(), 2);
/// ```
pub struct CustomerValidator;

impl CustomerValidator {
    /// Validates every field of a customer payload
    pub fn validate(details: &CustomerDetails) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_name(
            &details.first_name,
            "firstName",
            "First name is mandatory",
            "First name can only contain alphabetic characters",
            &mut result,
        );
        Self::validate_name(
            &details.last_name,
            "lastName",
            "Last name is mandatory",
            "Last name can only contain alphabetic characters",
            &mut result,
        );
        Self::validate_email(&details.email, &mut result);

        if let Some(contact) = &details.contact {
            Self::validate_contact(contact, &mut result);
        }

        result
    }

    /// Validates and converts the outcome into a domain error
    pub fn check(details: &CustomerDetails) -> Result<(), CustomerError> {
        Self::validate(details).into_result()
    }

    fn validate_name(
        value: &str,
        field: &str,
        mandatory: &str,
        alphabetic: &str,
        result: &mut ValidationResult,
    ) {
        if is_blank(value) {
            result.add_error(field, mandatory);
        } else if !value.chars().all(|c| c.is_ascii_alphabetic()) {
            result.add_error(field, alphabetic);
        }
    }

    fn validate_email(email: &str, result: &mut ValidationResult) {
        if is_blank(email) {
            result.add_error("email", "Email is mandatory");
            return;
        }
        if !email.to_string().validate_email() {
            result.add_error("email", "Invalid email format");
        }
        if email.chars().count() > EMAIL_MAX_LENGTH {
            result.add_error("email", "Email must be less than 50 characters");
        }
    }

    fn validate_contact(contact: &ContactDetails, result: &mut ValidationResult) {
        if let Some(phone_number) = &contact.phone_number {
            if !is_phone_number(phone_number) {
                result.add_error(
                    "contact.phoneNumber",
                    "Invalid phone number format. Expected format: (###) ###-####",
                );
            }
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Matches `(###) ###-####` exactly, i.e. `^\(\d{3}\) \d{3}-\d{4}$` with ASCII digits
pub fn is_phone_number(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 14 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        0 => *b == b'(',
        4 => *b == b')',
        5 => *b == b' ',
        9 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}
