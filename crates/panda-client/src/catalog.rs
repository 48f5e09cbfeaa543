//! # Catalog Client
//!
//! The contract the ordering session uses to reach the backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CatalogClient Implementations                        │
//! │                                                                         │
//! │   OrderingSession ──► Arc<dyn CatalogClient>                           │
//! │                              │                                          │
//! │              ┌───────────────┴────────────────┐                        │
//! │              ▼                                ▼                        │
//! │     HttpCatalogClient                  in-memory fakes                 │
//! │     (reqwest, JSON)                    (tests)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations only move data. They never touch the cart or the
//! selection state.

use async_trait::async_trait;
use panda_core::{MenuItem, OrderConfirmation, OrderRequest, Restaurant};

use crate::error::{CheckoutResult, FetchResult};

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Every restaurant the backend offers.
    async fn list_restaurants(&self) -> FetchResult<Vec<Restaurant>>;

    /// Menu for one restaurant. An unknown id is [`FetchError::NotFound`].
    ///
    /// [`FetchError::NotFound`]: crate::error::FetchError::NotFound
    async fn get_menu(&self, restaurant_id: &str) -> FetchResult<Vec<MenuItem>>;

    /// Places an order and returns the server-confirmed total.
    async fn submit_order(&self, order: &OrderRequest) -> CheckoutResult<OrderConfirmation>;

    /// Asks the backend to load its demo catalog. `reset` wipes existing data
    /// first. Backends without seeding keep the default no-op.
    async fn ensure_seeded(&self, _reset: bool) -> FetchResult<()> {
        Ok(())
    }
}
