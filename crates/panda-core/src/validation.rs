//! # Validation Module
//!
//! Checks that the customer identity is filled in before an order leaves
//! the client. Format rules (what counts as a deliverable email or address)
//! belong to the order backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View layer                                                   │
//! │  └── Input widgets, immediate feedback                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout (Rust)                                              │
//! │  └── THIS MODULE: email / address must not be blank                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order backend                                                │
//! │  └── Authoritative acceptance or rejection                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use panda_core::validation::{validate_address, validate_email};
//!
//! assert!(validate_email("guest@localhost").is_ok());
//! assert!(validate_address("123 Main St").is_ok());
//! assert!(validate_email("   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Customer;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the email the order confirmation goes to.
///
/// Only blank input is rejected. Anything else is passed through and the
/// backend decides.
///
/// ```rust
/// use panda_core::validation::validate_email;
///
/// assert!(validate_email("guest@example.com").is_ok());
/// assert!(validate_email("guest@localhost").is_ok());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("email", email)
}

/// Validates the delivery address. Must not be blank.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    require("address", address)
}

/// Validates both halves of the customer identity, email first.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    validate_email(&customer.email)?;
    validate_address(&customer.address)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("guest@localhost").is_ok());
        assert!(validate_email("guest").is_ok());

        assert_eq!(
            validate_email("   "),
            Err(ValidationError::Required {
                field: "email".to_string()
            })
        );
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("123 Main St").is_ok());
        assert!(validate_address(&"A".repeat(300)).is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("\t\n").is_err());
    }

    #[test]
    fn test_validate_customer_reports_email_first() {
        let customer = Customer::new("", "");
        let err = validate_customer(&customer).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "email".to_string()
            }
        );

        assert!(validate_customer(&Customer::new("guest@localhost", "123 Main St")).is_ok());
        assert!(validate_customer(&Customer::default()).is_ok());
    }
}
