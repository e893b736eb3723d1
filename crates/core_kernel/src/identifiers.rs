//! Strongly-typed identifiers for domain entities
//!
//! Rows are keyed by storage-generated integers. Wrapping them in newtypes
//! keeps a customer id from being passed where an address id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw storage key
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw storage key
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// Returns the entity name used in messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(CustomerId, "Customer");
define_id!(AddressId, "Address");
define_id!(ContactId, "Contact");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_display_is_raw_number() {
        let id = CustomerId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: AddressId = " 7 ".parse().unwrap();
        assert_eq!(parsed, AddressId::new(7));
        assert!("seven".parse::<AddressId>().is_err());
    }

    #[test]
    fn test_i64_conversion() {
        let id = ContactId::from(9);
        let back: i64 = id.into();
        assert_eq!(back, 9);
    }
}
