//! # Cart
//!
//! The shopping cart for the restaurant currently being viewed.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Intent              Operation               Cart Change           │
//! │  ───────────              ─────────               ───────────           │
//! │                                                                         │
//! │  Click "Add" ────────────► add_item() ──────────► new line (qty 1)     │
//! │                                                 or existing qty + 1     │
//! │                                                                         │
//! │  Click + / - ────────────► set_quantity() ──────► qty = max(1, n)      │
//! │                                                                         │
//! │  Open restaurant ────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Render cart panel ──────► snapshot(fee) ───────► (read only)          │
//! │                                                                         │
//! │  NOTE: there is no "remove line" operation. The lowest quantity a      │
//! │        line can reach is 1; the cart only empties on clear().          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals Are Derived
//! The cart stores lines only. Subtotal and total are computed by
//! [`Cart::snapshot`] on every read, so there is no cached total to go
//! stale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{self, Money};
use crate::types::MenuItem;

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct menu item and its accumulated quantity.
///
/// ## Price Freezing
/// `name` and `unit_price` are copied from the menu item when the line is
/// first added. Adding the same item again only bumps the quantity, so the
/// line keeps its original price even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Same as the source menu item id. Unique within the cart.
    pub id: String,

    /// Dish name at time of adding (frozen).
    pub name: String,

    /// Price at time of adding (frozen).
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub unit_price: Money,

    /// Always at least 1.
    pub quantity: u32,

    /// Restaurant the dish came from (frozen).
    pub restaurant_id: String,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line with quantity 1 from a menu item.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        CartLine {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            restaurant_id: item.restaurant_id.clone(),
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same dish increases quantity)
/// - Quantity is always >= 1
/// - Lines keep insertion order
/// - Every line belongs to the active restaurant. The cart cannot check this
///   itself; it is upheld by clearing the cart whenever a restaurant is
///   opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one of `item` to the cart.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1, name and price untouched
    /// - Not in cart: appended with quantity 1
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(CartLine::from_menu_item(item));
    }

    /// Sets a line's quantity, clamped to at least 1.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: quantity becomes 1 (the line is never removed)
    /// - `line_id` not in cart: nothing happens, no line is created
    ///
    /// Returns `true` if a line was updated.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) else {
            return false;
        };

        line.quantity = clamp_quantity(quantity);
        true
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by menu item id.
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// When the cart was created/last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines (the header badge).
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Computes a fresh snapshot of the cart with the given delivery fee.
    ///
    /// Pure: never mutates the cart, never caches.
    pub fn snapshot(&self, delivery_fee: Money) -> CartSnapshot {
        let subtotal = self.subtotal();
        CartSnapshot {
            lines: self.lines.clone(),
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_quantity(requested: i64) -> u32 {
    u32::try_from(requested.max(1)).unwrap_or(u32::MAX)
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Cart contents and totals for rendering.
///
/// Amounts serialize in dollars, the same unit as [`Restaurant`] and
/// [`MenuItem`].
///
/// [`Restaurant`]: crate::types::Restaurant
///
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │  Your Order                                  │
/// │  Chicken Biryani      $20.00     [-] 2 [+]   │
/// │  ─────────────────────────────────────────   │
/// │  Subtotal                         $20.00     │
/// │  Delivery                          $3.00     │
/// │  Total                            $23.00     │
/// └──────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub item_count: usize,
    pub total_quantity: u64,
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub subtotal: Money,
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub delivery_fee: Money,
    #[serde(with = "money::dollars")]
    #[ts(type = "number")]
    pub total: Money,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
