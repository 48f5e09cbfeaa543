//! # Ordering Session
//!
//! The object a view layer holds: one catalog client, the selection, the
//! cart, the checkout flow and the customer identity, behind intent methods.
//!
//! ## Intent Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen action              Session intent            Touches           │
//! │  ─────────────              ──────────────            ───────           │
//! │  App start                  start()                   seed?, directory  │
//! │  Click restaurant card      open_restaurant(id)       selection, cart   │
//! │  Click "Back"               close_restaurant()        selection         │
//! │  Click "Add"                add_item(item_id)         cart              │
//! │  Click + / -                increment / decrement     cart              │
//! │  Edit email / address       set_email / set_address   customer          │
//! │  Click "Checkout"           checkout()                (reads only)      │
//! │                                                                         │
//! │  Render header badge        cart_count()                                │
//! │  Render cart panel          cart_snapshot()                             │
//! │  Render main area           view()                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All methods take `&self`; several intents may be awaited concurrently
//! against one session.

use panda_core::{CartSnapshot, CoreError, Customer, MenuItem, Restaurant};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::catalog::CatalogClient;
use crate::checkout::{CheckoutFlow, CheckoutOutcome};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpCatalogClient;
use crate::state::{lock, CartStore, OpenOutcome, SelectionContext, SelectionView};

pub struct OrderingSession {
    catalog: Arc<dyn CatalogClient>,
    selection: SelectionContext,
    cart: CartStore,
    checkout: CheckoutFlow,
    customer: Mutex<Customer>,
    seed_on_start: bool,
}

impl OrderingSession {
    /// Creates a session in the Browsing state with an empty cart.
    ///
    /// Seeding on start is off; see [`with_seed_on_start`](Self::with_seed_on_start).
    pub fn new(catalog: Arc<dyn CatalogClient>, customer: Customer) -> Self {
        OrderingSession {
            catalog,
            selection: SelectionContext::new(),
            cart: CartStore::new(),
            checkout: CheckoutFlow::new(),
            customer: Mutex::new(customer),
            seed_on_start: false,
        }
    }

    /// Creates a session talking HTTP to the configured backend.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let catalog = HttpCatalogClient::from_config(config)?;
        info!(base_url = %catalog.base_url(), "Ordering session configured");

        Ok(Self::new(Arc::new(catalog), config.customer())
            .with_seed_on_start(config.backend.seed_on_start))
    }

    /// Whether [`start`](Self::start) asks the backend to seed first.
    pub fn with_seed_on_start(mut self, seed: bool) -> Self {
        self.seed_on_start = seed;
        self
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Seeds the backend if configured, then loads the restaurant list.
    ///
    /// A failed seed is logged and ignored; a failed list load is returned.
    pub async fn start(&self) -> ClientResult<Vec<Restaurant>> {
        if self.seed_on_start {
            if let Err(e) = self.catalog.ensure_seeded(false).await {
                warn!(error = %e, "Seeding failed, continuing with existing data");
            }
        }

        self.load_restaurants().await
    }

    /// Reloads the restaurant list.
    pub async fn load_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        Ok(self.selection.load_restaurants(self.catalog.as_ref()).await?)
    }

    /// Opens a restaurant. On success the cart is emptied.
    pub async fn open_restaurant(&self, restaurant_id: &str) -> ClientResult<OpenOutcome> {
        debug!(restaurant_id, "Intent: open restaurant");
        Ok(self
            .selection
            .open_restaurant(self.catalog.as_ref(), &self.cart, restaurant_id)
            .await?)
    }

    /// Goes back to the restaurant list. The cart is kept.
    pub fn close_restaurant(&self) {
        debug!("Intent: close restaurant");
        self.selection.close_restaurant();
    }

    /// Adds one of a dish from the active menu.
    ///
    /// ## Errors
    /// - [`CoreError::NoActiveRestaurant`] while browsing
    /// - [`CoreError::MenuItemNotFound`] if the dish is not on the menu
    pub fn add_item(&self, item_id: &str) -> ClientResult<CartSnapshot> {
        debug!(item_id, "Intent: add item");
        // Lookup and add happen under one selection lock so an open that
        // commits concurrently cannot slip between them.
        self.selection.with_view(|view| -> ClientResult<CartSnapshot> {
            let restaurant = view.restaurant().ok_or(CoreError::NoActiveRestaurant)?;
            let item = view
                .menu()
                .iter()
                .find(|item| item.id == item_id)
                .ok_or_else(|| CoreError::MenuItemNotFound {
                    restaurant_id: restaurant.id.clone(),
                    item_id: item_id.to_string(),
                })?;

            self.cart.add_item(item);
            Ok(self.cart.snapshot(restaurant.delivery_fee))
        })
    }

    /// Adds one of `item` as given, without checking it against the menu.
    pub fn add_menu_item(&self, item: &MenuItem) -> CartSnapshot {
        debug!(item_id = %item.id, "Intent: add menu item");
        self.cart.add_item(item);
        self.cart_snapshot()
    }

    /// Sets a line's quantity (minimum 1). Unknown lines are ignored.
    pub fn set_quantity(&self, line_id: &str, quantity: i64) -> CartSnapshot {
        debug!(line_id, quantity, "Intent: set quantity");
        self.cart.set_quantity(line_id, quantity);
        self.cart_snapshot()
    }

    /// The "+" button.
    pub fn increment(&self, line_id: &str) -> CartSnapshot {
        self.step_quantity(line_id, 1)
    }

    /// The "-" button. Stops at 1.
    pub fn decrement(&self, line_id: &str) -> CartSnapshot {
        self.step_quantity(line_id, -1)
    }

    fn step_quantity(&self, line_id: &str, delta: i64) -> CartSnapshot {
        self.cart.with_cart_mut(|cart| {
            if let Some(current) = cart.line(line_id).map(|l| i64::from(l.quantity)) {
                cart.set_quantity(line_id, current.saturating_add(delta));
            }
        });
        debug!(line_id, delta, "Intent: step quantity");
        self.cart_snapshot()
    }

    pub fn set_email(&self, email: &str) {
        lock(&self.customer).email = email.to_string();
    }

    pub fn set_address(&self, address: &str) {
        lock(&self.customer).address = address.to_string();
    }

    /// Submits the cart as an order for the active restaurant.
    ///
    /// The cart is not cleared afterwards.
    pub async fn checkout(&self) -> ClientResult<CheckoutOutcome> {
        debug!("Intent: checkout");
        let customer = self.customer();
        Ok(self
            .checkout
            .checkout(self.catalog.as_ref(), &self.selection, &self.cart, &customer)
            .await?)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Cart with totals. The fee is the active restaurant's, zero while
    /// browsing.
    pub fn cart_snapshot(&self) -> CartSnapshot {
        self.selection.with_active(|active| {
            let fee = active.map(|r| r.delivery_fee).unwrap_or_default();
            self.cart.snapshot(fee)
        })
    }

    /// Total quantity across lines.
    pub fn cart_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    pub fn view(&self) -> SelectionView {
        self.selection.view()
    }

    pub fn restaurants(&self) -> Vec<Restaurant> {
        self.selection.restaurants()
    }

    pub fn customer(&self) -> Customer {
        lock(&self.customer).clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.checkout.is_submitting()
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ConfigError};

    #[test]
    fn test_from_config_rejects_bad_url() {
        let mut config = ClientConfig::default();
        config.backend.base_url = "localhost:8000".to_string();

        let err = OrderingSession::from_config(&config).err().unwrap();
        assert!(matches!(err, ClientError::Config(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config_uses_configured_customer() {
        let mut config = ClientConfig::default();
        config.customer.email = "ayesha@example.com".to_string();

        let session = OrderingSession::from_config(&config).unwrap();
        assert_eq!(session.customer().email, "ayesha@example.com");
        assert!(session.seed_on_start);
        assert_eq!(session.view(), SelectionView::Browsing);
        assert_eq!(session.cart_count(), 0);
    }

    #[test]
    fn test_customer_edits() {
        let config = ClientConfig::default();
        let session = OrderingSession::from_config(&config).unwrap();

        session.set_email("bilal@example.com");
        session.set_address("7 Mall Road");

        assert_eq!(
            session.customer(),
            Customer::new("bilal@example.com", "7 Mall Road")
        );
    }
}
