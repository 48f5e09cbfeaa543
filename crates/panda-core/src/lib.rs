//! # panda-core: Pure Ordering Logic for the FoodPanda Client
//!
//! This crate holds the ordering rules as plain data and pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     FoodPanda Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View layer (out of tree)                     │   │
//! │  │   Restaurant list ──► Menu ──► Cart panel ──► Checkout button   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 panda-client (OrderingSession)                  │   │
//! │  │   SelectionContext • CartStore • CheckoutFlow • CatalogClient   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ panda-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │Restaurant │  │   Money   │  │   Cart    │  │  Request  │  │   │
//! │  │   │ MenuItem  │  │  dollars  │  │ Snapshot  │  │  Confirm  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO ASYNC                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Restaurant, MenuItem) and Customer
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart, CartLine and the derived CartSnapshot
//! - [`order`] - OrderRequest built from the cart, OrderConfirmation
//! - [`error`] - Domain error types
//! - [`validation`] - Customer identity rules
//!
//! ## Example Usage
//!
//! ```rust
//! use panda_core::{Cart, MenuItem, Money};
//!
//! let biryani = MenuItem {
//!     id: "m-1".to_string(),
//!     restaurant_id: "r-1".to_string(),
//!     name: "Chicken Biryani".to_string(),
//!     description: String::new(),
//!     price: Money::from_cents(1000),
//!     image: String::new(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&biryani);
//! cart.add_item(&biryani);
//!
//! let snapshot = cart.snapshot(Money::from_cents(300));
//! assert_eq!(snapshot.subtotal.cents(), 2000);
//! assert_eq!(snapshot.total.cents(), 2300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderConfirmation, OrderLine, OrderRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Email the ordering screen is pre-filled with.
pub const DEFAULT_CUSTOMER_EMAIL: &str = "guest@example.com";

/// Delivery address used until the customer provides one.
pub const DEFAULT_DELIVERY_ADDRESS: &str = "123 Main St";
