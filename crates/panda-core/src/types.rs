//! # Domain Types
//!
//! Catalog types as the backend serves them, plus the customer identity
//! attached to an order.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Restaurant    │   │    MenuItem     │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  restaurant_id  │   │  email          │       │
//! │  │  name, cuisine  │   │  id, name       │   │  address        │       │
//! │  │  rating         │   │  description    │   └─────────────────┘       │
//! │  │  delivery_fee   │   │  price          │                              │
//! │  │  image          │   │  image          │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog entities are immutable once fetched. Amounts arrive as JSON
//! numbers in major units and are held as [`Money`] cents.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};
use crate::{DEFAULT_CUSTOMER_EMAIL, DEFAULT_DELIVERY_ADDRESS};

// =============================================================================
// Restaurant
// =============================================================================

/// A restaurant listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Cuisine tag ("Pakistani", "Pizza", ...).
    #[serde(default)]
    pub cuisine: String,

    /// Average rating, typically 0-5.
    #[serde(default)]
    pub rating: f64,

    /// Flat delivery fee. A listing without a fee (or a null one) delivers
    /// for free.
    #[serde(default, with = "money::dollars_or_zero")]
    #[ts(type = "number")]
    pub delivery_fee: Money,

    /// Image URL.
    #[serde(default)]
    pub image: String,
}

impl Restaurant {
    /// Rating rounded to one decimal, as shown on the restaurant card.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on a restaurant's menu.
///
/// Scoped to exactly one restaurant; the cart copies `restaurant_id` into
/// every line so checkout can verify the cart was never mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub price: Money,
    #[serde(default)]
    pub image: String,
}

// =============================================================================
// Customer
// =============================================================================

/// Who the order is for and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub email: String,
    pub address: String,
}

impl Customer {
    pub fn new(email: impl Into<String>, address: impl Into<String>) -> Self {
        Customer {
            email: email.into(),
            address: address.into(),
        }
    }
}

/// The guest identity the ordering screen starts with.
impl Default for Customer {
    fn default() -> Self {
        Customer::new(DEFAULT_CUSTOMER_EMAIL, DEFAULT_DELIVERY_ADDRESS)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
