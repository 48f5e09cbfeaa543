//! # Order Request
//!
//! The checkout payload, built fresh from the cart on every attempt.
//!
//! ## Building an Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart → OrderRequest                                  │
//! │                                                                         │
//! │  Customer { email, address } ──────────────┐                           │
//! │                                             │                           │
//! │  Cart lines ── restaurant_id == active? ────┼──► OrderRequest::build   │
//! │                 (RestaurantMismatch if not) │                           │
//! │                                             │                           │
//! │  Restaurant.delivery_fee ───────────────────┘                           │
//! │                                                                         │
//! │  Wire shape (POST /orders):                                            │
//! │  { "email": "...", "address": "...",                                   │
//! │    "items": [{ "item_id", "restaurant_id", "name", "price", "qty" }],  │
//! │    "delivery_fee": 3.0 }                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::error::{CoreError, CoreResult};
use crate::money::{self, Money};
use crate::types::{Customer, Restaurant};

/// One ordered dish on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(with = "money::dollars")]
    pub price: Money,
    pub qty: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            item_id: line.id.clone(),
            restaurant_id: line.restaurant_id.clone(),
            name: line.name.clone(),
            price: line.unit_price,
            qty: line.quantity,
        }
    }
}

/// A checkout submission. Transient: never stored client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub email: String,
    pub address: String,
    pub items: Vec<OrderLine>,
    #[serde(with = "money::dollars")]
    pub delivery_fee: Money,
}

impl OrderRequest {
    /// Builds an order for `restaurant` from the cart lines.
    ///
    /// The delivery fee comes from the restaurant entity. Lines keep cart
    /// order.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyOrder`] if there are no lines
    /// - [`CoreError::RestaurantMismatch`] if any line came from another
    ///   restaurant
    pub fn build(
        customer: &Customer,
        restaurant: &Restaurant,
        lines: &[CartLine],
    ) -> CoreResult<Self> {
        if lines.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        if let Some(stray) = lines.iter().find(|l| l.restaurant_id != restaurant.id) {
            return Err(CoreError::RestaurantMismatch {
                line_id: stray.id.clone(),
                line_restaurant_id: stray.restaurant_id.clone(),
                active_restaurant_id: restaurant.id.clone(),
            });
        }

        Ok(OrderRequest {
            email: customer.email.trim().to_string(),
            address: customer.address.trim().to_string(),
            items: lines.iter().map(OrderLine::from).collect(),
            delivery_fee: restaurant.delivery_fee,
        })
    }

    /// Σ price × qty + delivery fee, what the server is expected to confirm.
    pub fn expected_total(&self) -> Money {
        self.items.iter().map(OrderLine::line_total).sum::<Money>() + self.delivery_fee
    }
}

/// The backend's answer to a submitted order.
///
/// Only `total` is read; other response fields are ignored. A response
/// without a numeric `total` does not deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    #[serde(with = "money::dollars")]
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
