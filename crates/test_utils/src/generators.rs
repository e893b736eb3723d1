//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating customer payloads that
//! satisfy (or deliberately break) the field validation rules.

use proptest::prelude::*;

use domain_customer::{
    AddressDetails, AddressType, ContactDetails, ContactType, CustomerDetails,
};

/// Strategy for ASCII-alphabetic names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,19}"
}

/// Strategy for names containing at least one non-letter
pub fn invalid_name_strategy() -> impl Strategy<Value = String> {
    ("[A-Za-z]{0,8}", "[0-9 _.-]", "[A-Za-z]{0,8}")
        .prop_map(|(prefix, bad, suffix)| format!("{}{}{}", prefix, bad, suffix))
}

/// Strategy for syntactically valid emails of at most 50 characters
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,15}", "[a-z]{2,10}", prop_oneof![Just("com"), Just("org"), Just("net")])
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for phone numbers in `(###) ###-####` format
pub fn phone_strategy() -> impl Strategy<Value = String> {
    (0u32..1000, 0u32..1000, 0u32..10000)
        .prop_map(|(area, exchange, line)| format!("({:03}) {:03}-{:04}", area, exchange, line))
}

/// Strategy for address types
pub fn address_type_strategy() -> impl Strategy<Value = AddressType> {
    prop_oneof![
        Just(AddressType::Home),
        Just(AddressType::Work),
        Just(AddressType::Other),
    ]
}

/// Strategy for contact types
pub fn contact_type_strategy() -> impl Strategy<Value = ContactType> {
    prop_oneof![
        Just(ContactType::Mobile),
        Just(ContactType::Home),
        Just(ContactType::Work),
    ]
}

/// Strategy for addresses with any mix of null fields
pub fn address_strategy() -> impl Strategy<Value = AddressDetails> {
    (
        proptest::option::of("[0-9]{1,4} [A-Z][a-z]{2,10} St"),
        proptest::option::of("[A-Z][a-z]{2,12}"),
        proptest::option::of("[A-Z]{2}"),
        proptest::option::of("[0-9]{5}"),
        proptest::option::of(address_type_strategy()),
    )
        .prop_map(|(street, city, state, zip, address_type)| AddressDetails {
            street,
            city,
            state,
            zip,
            address_type,
        })
}

/// Strategy for contacts with a valid or missing phone number
pub fn contact_strategy() -> impl Strategy<Value = ContactDetails> {
    (
        proptest::option::of(phone_strategy()),
        proptest::option::of(contact_type_strategy()),
    )
        .prop_map(|(phone_number, contact_type)| ContactDetails {
            phone_number,
            contact_type,
        })
}

/// Strategy for customer payloads that pass validation
pub fn valid_customer_strategy() -> impl Strategy<Value = CustomerDetails> {
    (
        name_strategy(),
        name_strategy(),
        email_strategy(),
        proptest::option::of(address_strategy()),
        proptest::option::of(contact_strategy()),
    )
        .prop_map(|(first_name, last_name, email, address, contact)| CustomerDetails {
            first_name,
            last_name,
            email,
            address,
            contact,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_customer::validation::is_phone_number;
    use domain_customer::CustomerValidator;

    proptest! {
        #[test]
        fn test_valid_customers_pass_validation(details in valid_customer_strategy()) {
            prop_assert!(CustomerValidator::validate(&details).is_valid());
        }

        #[test]
        fn test_generated_phones_match_format(phone in phone_strategy()) {
            prop_assert!(is_phone_number(&phone));
        }

        #[test]
        fn test_invalid_names_fail_validation(name in invalid_name_strategy()) {
            let details = CustomerDetails::new(name, "Doe", "john@example.com");
            prop_assert!(!CustomerValidator::validate(&details).is_valid());
        }
    }
}
