//! # Error Types
//!
//! Domain-specific error types for panda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  panda-core errors (this file)                                         │
//! │  ├── CoreError        - Ordering rule violations                       │
//! │  └── ValidationError  - Customer input failures                        │
//! │                                                                         │
//! │  panda-client errors (separate crate)                                  │
//! │  ├── FetchError       - Listing / menu fetch failures                  │
//! │  ├── CheckoutError    - Order submission failures                      │
//! │  └── ClientError      - What the view layer sees                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → ClientError       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ordering rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An intent needs a restaurant to be open, but the user is browsing.
    #[error("No restaurant is open")]
    NoActiveRestaurant,

    /// The dish is not on the open restaurant's menu.
    #[error("Menu item {item_id} not found for restaurant {restaurant_id}")]
    MenuItemNotFound {
        restaurant_id: String,
        item_id: String,
    },

    /// A cart line belongs to a different restaurant than the one being
    /// ordered from.
    ///
    /// ## When This Occurs
    /// Only if a dish was added without being looked up on the open menu.
    /// Switching restaurants always clears the cart, so menu-driven adds
    /// cannot mix restaurants. Checked again before an order is built so a
    /// mixed cart is never submitted.
    #[error(
        "Cart line {line_id} belongs to restaurant {line_restaurant_id}, not {active_restaurant_id}"
    )]
    RestaurantMismatch {
        line_id: String,
        line_restaurant_id: String,
        active_restaurant_id: String,
    },

    /// An order was built from an empty cart.
    #[error("Cannot build an order from an empty cart")]
    EmptyOrder,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for the customer identity typed into the order form, before any
/// request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
