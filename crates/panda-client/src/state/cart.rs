//! # Cart Store
//!
//! Shared cart state for the ordering session.
//!
//! The [`Cart`] itself lives in panda-core and knows nothing about
//! concurrency. `CartStore` wraps it in a `Mutex` so intent futures running
//! against the same session can read and update it through `&self`.

use panda_core::{Cart, CartSnapshot, MenuItem, Money};
use std::sync::Mutex;
use tracing::debug;

use super::lock;

/// Thread-safe cart wrapper.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Creates a new empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// # use panda_client::CartStore;
    /// let store = CartStore::new();
    /// let count = store.with_cart(|cart| cart.total_quantity());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = lock(&self.cart);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = lock(&self.cart);
        f(&mut cart)
    }

    /// Adds one of `item`. See [`Cart::add_item`].
    pub fn add_item(&self, item: &MenuItem) {
        let quantity = self.with_cart_mut(|cart| {
            cart.add_item(item);
            cart.line(&item.id).map(|l| l.quantity).unwrap_or_default()
        });
        debug!(item_id = %item.id, quantity, "Added to cart");
    }

    /// Sets a line's quantity, clamped to at least 1. Returns whether a line
    /// was updated. See [`Cart::set_quantity`].
    pub fn set_quantity(&self, line_id: &str, quantity: i64) -> bool {
        let updated = self.with_cart_mut(|cart| cart.set_quantity(line_id, quantity));
        if updated {
            debug!(line_id, quantity, "Cart quantity set");
        } else {
            debug!(line_id, "Quantity change for a line not in the cart ignored");
        }
        updated
    }

    /// Current quantity of a line, if present.
    pub fn quantity_of(&self, line_id: &str) -> Option<u32> {
        self.with_cart(|cart| cart.line(line_id).map(|l| l.quantity))
    }

    /// Empties the cart.
    pub fn clear(&self) {
        self.with_cart_mut(Cart::clear);
        debug!("Cart cleared");
    }

    /// Totals and lines for rendering.
    pub fn snapshot(&self, delivery_fee: Money) -> CartSnapshot {
        self.with_cart(|cart| cart.snapshot(delivery_fee))
    }

    /// Sum of quantities (the header badge).
    pub fn total_quantity(&self) -> u64 {
        self.with_cart(Cart::total_quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }
}
