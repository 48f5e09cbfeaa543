//! In-memory catalog for session tests.
//!
//! Menu fetches and order submissions can be held on a `oneshot` gate so a
//! test decides the order in which concurrent calls complete.

#![allow(dead_code)]

use async_trait::async_trait;
use panda_client::{CatalogClient, CheckoutError, CheckoutResult, FetchError, FetchResult};
use panda_core::{MenuItem, Money, OrderConfirmation, OrderRequest, Restaurant};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn restaurant(id: &str, fee_cents: i64) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: format!("Restaurant {}", id),
        cuisine: "Pakistani".to_string(),
        rating: 4.5,
        delivery_fee: Money::from_cents(fee_cents),
        image: String::new(),
    }
}

pub fn dish(id: &str, restaurant_id: &str, price_cents: i64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: format!("Dish {}", id),
        description: String::new(),
        price: Money::from_cents(price_cents),
        image: String::new(),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    restaurants: Mutex<Vec<Restaurant>>,
    menus: Mutex<HashMap<String, Vec<MenuItem>>>,

    menu_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    submit_gate: Mutex<Option<oneshot::Receiver<()>>>,

    failing_menus: Mutex<HashSet<String>>,
    fail_list: Mutex<bool>,
    fail_seed: Mutex<bool>,
    /// Total to confirm instead of the order's own.
    confirm_total: Mutex<Option<Money>>,
    reject_orders: Mutex<bool>,

    pub list_calls: AtomicUsize,
    pub menu_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub seed_calls: AtomicUsize,
    pub orders: Mutex<Vec<OrderRequest>>,
}

impl FakeCatalog {
    /// Two restaurants: r0 (fee 1.00, dish B 5.00) and r1 (fee 3.00,
    /// dishes A 10.00 and C 2.50).
    pub fn standard() -> Self {
        let fake = FakeCatalog::default();
        fake.add_restaurant(restaurant("r0", 100), vec![dish("B", "r0", 500)]);
        fake.add_restaurant(
            restaurant("r1", 300),
            vec![dish("A", "r1", 1000), dish("C", "r1", 250)],
        );
        fake
    }

    pub fn add_restaurant(&self, restaurant: Restaurant, menu: Vec<MenuItem>) {
        self.menus
            .lock()
            .unwrap()
            .insert(restaurant.id.clone(), menu);
        self.restaurants.lock().unwrap().push(restaurant);
    }

    /// Drops a menu while keeping the restaurant listed.
    pub fn remove_menu(&self, restaurant_id: &str) {
        self.menus.lock().unwrap().remove(restaurant_id);
    }

    /// Holds the next menu fetch for `restaurant_id` until the sender fires.
    pub fn gate_menu(&self, restaurant_id: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.menu_gates
            .lock()
            .unwrap()
            .insert(restaurant_id.to_string(), rx);
        tx
    }

    /// Holds the next order submission until the sender fires.
    pub fn gate_submit(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.submit_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn fail_menu(&self, restaurant_id: &str) {
        self.failing_menus
            .lock()
            .unwrap()
            .insert(restaurant_id.to_string());
    }

    pub fn fail_list(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    pub fn fail_seed(&self) {
        *self.fail_seed.lock().unwrap() = true;
    }

    pub fn confirm_total(&self, total: Money) {
        *self.confirm_total.lock().unwrap() = Some(total);
    }

    pub fn reject_orders(&self) {
        *self.reject_orders.lock().unwrap() = true;
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.menu_calls.load(Ordering::SeqCst),
            self.submit_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn list_restaurants(&self) -> FetchResult<Vec<Restaurant>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.lock().unwrap() {
            return Err(FetchError::Status {
                status: 503,
                body: "maintenance".into(),
            });
        }
        Ok(self.restaurants.lock().unwrap().clone())
    }

    async fn get_menu(&self, restaurant_id: &str) -> FetchResult<Vec<MenuItem>> {
        self.menu_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.menu_gates.lock().unwrap().remove(restaurant_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing_menus.lock().unwrap().contains(restaurant_id) {
            return Err(FetchError::Transport("connection reset".into()));
        }

        self.menus
            .lock()
            .unwrap()
            .get(restaurant_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                resource: format!("Menu for restaurant {}", restaurant_id),
            })
    }

    async fn submit_order(&self, order: &OrderRequest) -> CheckoutResult<OrderConfirmation> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.submit_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if *self.reject_orders.lock().unwrap() {
            return Err(CheckoutError::Rejected {
                status: 400,
                body: "restaurant closed".into(),
            });
        }

        self.orders.lock().unwrap().push(order.clone());
        let total = self
            .confirm_total
            .lock()
            .unwrap()
            .unwrap_or_else(|| order.expected_total());
        Ok(OrderConfirmation { total })
    }

    async fn ensure_seeded(&self, _reset: bool) -> FetchResult<()> {
        self.seed_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_seed.lock().unwrap() {
            return Err(FetchError::Transport("seed endpoint unreachable".into()));
        }
        Ok(())
    }
}
