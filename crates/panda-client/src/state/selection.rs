//! # Selection Context
//!
//! Which restaurant the user is looking at, and its menu.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                     open_restaurant(X) ok                               │
//! │     ┌──────────┐  ─────────────────────────►  ┌───────────────────┐     │
//! │     │ Browsing │                              │ Viewing(X, menu)  │──┐  │
//! │     └──────────┘  ◄─────────────────────────  └───────────────────┘  │  │
//! │          ▲            close_restaurant()              ▲             │  │
//! │          │                                            └─────────────┘  │
//! │       initial                                   open_restaurant(Y) ok  │
//! │                                                                         │
//! │  Every successful open clears the cart. A failed or stale open changes │
//! │  nothing.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Responses
//! ```text
//! open(R1) ── ticket 1 ── get_menu(R1) ...................... resolves ──► discarded
//! open(R2) ──────── ticket 2 ── get_menu(R2) ── resolves ──► committed
//! ```
//! Each open takes a ticket before fetching. On resolution it commits only
//! if no newer open or close was issued in the meantime. The check and the
//! commit happen under the same lock.

use panda_core::{MenuItem, Money, Restaurant};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use super::{lock, CartStore};
use crate::catalog::CatalogClient;
use crate::error::{FetchError, FetchResult};

/// What the user is looking at.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SelectionView {
    /// The restaurant list.
    #[default]
    Browsing,

    /// One restaurant and its menu.
    Viewing {
        restaurant: Restaurant,
        menu: Vec<MenuItem>,
    },
}

impl SelectionView {
    pub fn restaurant(&self) -> Option<&Restaurant> {
        match self {
            SelectionView::Browsing => None,
            SelectionView::Viewing { restaurant, .. } => Some(restaurant),
        }
    }

    pub fn menu(&self) -> &[MenuItem] {
        match self {
            SelectionView::Browsing => &[],
            SelectionView::Viewing { menu, .. } => menu,
        }
    }
}

/// How a successful menu fetch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    /// The restaurant is now active and the cart was cleared.
    Opened(Restaurant),

    /// A newer open or close was issued while this one was fetching. Nothing
    /// changed.
    Superseded,
}

#[derive(Debug, Default)]
struct SelectionState {
    directory: Vec<Restaurant>,
    view: SelectionView,
}

/// Restaurant directory plus the active restaurant and menu.
#[derive(Debug, Default)]
pub struct SelectionContext {
    state: Mutex<SelectionState>,

    /// Last ticket handed out by `open_restaurant` or `close_restaurant`.
    latest_ticket: AtomicU64,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Fetches the restaurant list and replaces the directory.
    ///
    /// On failure the previous directory is kept. The active restaurant is
    /// never touched.
    pub async fn load_restaurants(
        &self,
        catalog: &dyn CatalogClient,
    ) -> FetchResult<Vec<Restaurant>> {
        let restaurants = catalog.list_restaurants().await?;

        lock(&self.state).directory = restaurants.clone();
        info!(count = restaurants.len(), "Restaurant list loaded");

        Ok(restaurants)
    }

    /// Opens a restaurant from the directory: fetches its menu, makes it
    /// active and clears `cart`.
    ///
    /// ## Errors
    /// - [`FetchError::UnknownRestaurant`] if the id is not in the directory
    ///   (no fetch is made)
    /// - Whatever the menu fetch fails with
    ///
    /// On error the previous view and the cart are left untouched.
    pub async fn open_restaurant(
        &self,
        catalog: &dyn CatalogClient,
        cart: &CartStore,
        restaurant_id: &str,
    ) -> FetchResult<OpenOutcome> {
        let restaurant = self
            .find_restaurant(restaurant_id)
            .ok_or_else(|| FetchError::UnknownRestaurant(restaurant_id.to_string()))?;

        let ticket = self.issue_ticket();
        debug!(restaurant_id, ticket, "Fetching menu");

        let menu = match catalog.get_menu(restaurant_id).await {
            Ok(menu) => menu,
            Err(e) => {
                warn!(restaurant_id, ticket, error = %e, "Menu fetch failed");
                return Err(e);
            }
        };

        let mut state = lock(&self.state);
        if self.latest_ticket.load(Ordering::Acquire) != ticket {
            warn!(restaurant_id, ticket, "Discarding stale menu response");
            return Ok(OpenOutcome::Superseded);
        }

        state.view = SelectionView::Viewing {
            restaurant: restaurant.clone(),
            menu,
        };
        cart.clear();
        drop(state);

        info!(restaurant_id, ticket, "Restaurant opened");
        Ok(OpenOutcome::Opened(restaurant))
    }

    /// Returns to the restaurant list. The cart is kept.
    ///
    /// Also invalidates any open still waiting for its menu.
    pub fn close_restaurant(&self) {
        let ticket = self.issue_ticket();
        let mut state = lock(&self.state);
        if let Some(restaurant) = state.view.restaurant() {
            info!(restaurant_id = %restaurant.id, ticket, "Restaurant closed");
        }
        state.view = SelectionView::Browsing;
    }

    fn issue_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The last loaded restaurant list.
    pub fn restaurants(&self) -> Vec<Restaurant> {
        lock(&self.state).directory.clone()
    }

    pub fn find_restaurant(&self, restaurant_id: &str) -> Option<Restaurant> {
        lock(&self.state)
            .directory
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned()
    }

    pub fn active_restaurant(&self) -> Option<Restaurant> {
        lock(&self.state).view.restaurant().cloned()
    }

    /// Menu of the active restaurant. Empty while browsing.
    pub fn menu(&self) -> Vec<MenuItem> {
        lock(&self.state).view.menu().to_vec()
    }

    /// Looks up a dish on the active menu.
    pub fn menu_item(&self, item_id: &str) -> Option<MenuItem> {
        lock(&self.state)
            .view
            .menu()
            .iter()
            .find(|m| m.id == item_id)
            .cloned()
    }

    pub fn is_browsing(&self) -> bool {
        matches!(lock(&self.state).view, SelectionView::Browsing)
    }

    pub fn view(&self) -> SelectionView {
        lock(&self.state).view.clone()
    }

    /// Delivery fee of the active restaurant, zero while browsing.
    pub fn delivery_fee(&self) -> Money {
        self.with_active(|r| r.map(|r| r.delivery_fee).unwrap_or_default())
    }

    /// Runs `f` with the active restaurant while holding the selection lock.
    ///
    /// Lets a caller read the cart against a restaurant that cannot change
    /// underneath it. Lock the cart only inside `f`, never the other way
    /// round.
    pub fn with_active<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&Restaurant>) -> R,
    {
        self.with_view(|view| f(view.restaurant()))
    }

    /// Like [`with_active`](Self::with_active), with the menu as well.
    pub fn with_view<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SelectionView) -> R,
    {
        let state = lock(&self.state);
        f(&state.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutResult;
    use async_trait::async_trait;
    use panda_core::{OrderConfirmation, OrderRequest};
    use std::sync::atomic::AtomicUsize;

    struct FixedCatalog {
        menu_calls: AtomicUsize,
        fail_menu: bool,
    }

    impl FixedCatalog {
        fn new(fail_menu: bool) -> Self {
            FixedCatalog {
                menu_calls: AtomicUsize::new(0),
                fail_menu,
            }
        }
    }

    fn restaurant(id: &str, fee_cents: i64) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Restaurant {}", id),
            cuisine: String::new(),
            rating: 4.0,
            delivery_fee: Money::from_cents(fee_cents),
            image: String::new(),
        }
    }

    fn dish(id: &str, restaurant_id: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: format!("Dish {}", id),
            description: String::new(),
            price: Money::from_cents(500),
            image: String::new(),
        }
    }

    #[async_trait]
    impl CatalogClient for FixedCatalog {
        async fn list_restaurants(&self) -> FetchResult<Vec<Restaurant>> {
            Ok(vec![restaurant("r0", 100), restaurant("r1", 300)])
        }

        async fn get_menu(&self, restaurant_id: &str) -> FetchResult<Vec<MenuItem>> {
            self.menu_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_menu {
                return Err(FetchError::Transport("connection reset".into()));
            }
            Ok(vec![dish(&format!("{}-a", restaurant_id), restaurant_id)])
        }

        async fn submit_order(&self, _order: &OrderRequest) -> CheckoutResult<OrderConfirmation> {
            unreachable!("selection never submits orders")
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_browsing() {
        let selection = SelectionContext::new();
        assert!(selection.is_browsing());
        assert_eq!(selection.active_restaurant(), None);
        assert!(selection.menu().is_empty());
        assert_eq!(selection.delivery_fee(), Money::zero());
    }

    #[tokio::test]
    async fn test_open_sets_active_and_clears_cart() {
        let catalog = FixedCatalog::new(false);
        let selection = SelectionContext::new();
        let cart = CartStore::new();
        selection.load_restaurants(&catalog).await.unwrap();
        cart.add_item(&dish("x", "r0"));

        let outcome = selection.open_restaurant(&catalog, &cart, "r1").await.unwrap();

        assert_eq!(outcome, OpenOutcome::Opened(restaurant("r1", 300)));
        assert!(cart.is_empty());
        assert_eq!(selection.active_restaurant().unwrap().id, "r1");
        assert_eq!(selection.menu_item("r1-a").unwrap().restaurant_id, "r1");
        assert_eq!(selection.delivery_fee(), Money::from_cents(300));
    }

    #[tokio::test]
    async fn test_unknown_restaurant_makes_no_call() {
        let catalog = FixedCatalog::new(false);
        let selection = SelectionContext::new();
        let cart = CartStore::new();
        selection.load_restaurants(&catalog).await.unwrap();

        let err = selection
            .open_restaurant(&catalog, &cart, "r9")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::UnknownRestaurant(ref id) if id == "r9"));
        assert_eq!(catalog.menu_calls.load(Ordering::SeqCst), 0);
        assert!(selection.is_browsing());
    }

    #[tokio::test]
    async fn test_failed_open_keeps_previous_state() {
        let ok = FixedCatalog::new(false);
        let failing = FixedCatalog::new(true);
        let selection = SelectionContext::new();
        let cart = CartStore::new();
        selection.load_restaurants(&ok).await.unwrap();
        selection.open_restaurant(&ok, &cart, "r0").await.unwrap();
        cart.add_item(&dish("r0-a", "r0"));

        let err = selection
            .open_restaurant(&failing, &cart, "r1")
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(selection.active_restaurant().unwrap().id, "r0");
        assert_eq!(cart.quantity_of("r0-a"), Some(1));
    }

    #[tokio::test]
    async fn test_close_keeps_cart() {
        let catalog = FixedCatalog::new(false);
        let selection = SelectionContext::new();
        let cart = CartStore::new();
        selection.load_restaurants(&catalog).await.unwrap();
        selection.open_restaurant(&catalog, &cart, "r0").await.unwrap();
        cart.add_item(&dish("r0-a", "r0"));

        selection.close_restaurant();

        assert!(selection.is_browsing());
        assert_eq!(selection.view(), SelectionView::Browsing);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[tokio::test]
    async fn test_reload_keeps_active_restaurant() {
        let catalog = FixedCatalog::new(false);
        let selection = SelectionContext::new();
        let cart = CartStore::new();
        selection.load_restaurants(&catalog).await.unwrap();
        selection.open_restaurant(&catalog, &cart, "r1").await.unwrap();

        selection.load_restaurants(&catalog).await.unwrap();

        assert_eq!(selection.restaurants().len(), 2);
        assert_eq!(selection.active_restaurant().unwrap().id, "r1");
    }

    #[test]
    fn test_view_serializes_with_tag() {
        let json = serde_json::to_value(SelectionView::Browsing).unwrap();
        assert_eq!(json, serde_json::json!({ "view": "browsing" }));
    }
}
