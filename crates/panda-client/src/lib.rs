//! # panda-client: Ordering Session for the FoodPanda Client
//!
//! Async state and backend plumbing on top of panda-core.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ordering Data Flow                                │
//! │                                                                         │
//! │   View intent                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │                      OrderingSession                           │    │
//! │  │                                                                │    │
//! │  │   SelectionContext ──clear()──► CartStore                      │    │
//! │  │          │                          │                          │    │
//! │  │          └──────────┬───────────────┘                          │    │
//! │  │                     ▼                                          │    │
//! │  │               CheckoutFlow  (reads both, writes neither)       │    │
//! │  └─────────────────────┬──────────────────────────────────────────┘    │
//! │                        ▼                                                │
//! │              Arc<dyn CatalogClient>                                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │              HttpCatalogClient ──► backend (JSON over HTTP)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - `OrderingSession`, the facade a view layer drives
//! - [`state`] - `SelectionContext` and `CartStore`
//! - [`checkout`] - `CheckoutFlow` and its outcomes
//! - [`catalog`] - `CatalogClient` trait
//! - [`http`] - reqwest implementation of `CatalogClient`
//! - [`config`] - `ClientConfig` (TOML + environment)
//! - [`error`] - Error types
//! - [`telemetry`] - tracing subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use panda_client::{ClientConfig, OrderingSession};
//!
//! # async fn run() -> panda_client::ClientResult<()> {
//! panda_client::telemetry::init_tracing();
//!
//! let config = ClientConfig::load_or_default(None);
//! let session = OrderingSession::from_config(&config)?;
//!
//! let restaurants = session.start().await?;
//! if let Some(first) = restaurants.first() {
//!     session.open_restaurant(&first.id).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod state;
pub mod telemetry;

pub use catalog::CatalogClient;
pub use checkout::{CheckoutFlow, CheckoutOutcome, OrderReceipt, SkipReason};
pub use config::ClientConfig;
pub use error::{
    CheckoutError, CheckoutResult, ClientError, ClientResult, ConfigError, FetchError,
    FetchResult,
};
pub use http::HttpCatalogClient;
pub use session::OrderingSession;
pub use state::{CartStore, OpenOutcome, SelectionContext, SelectionView};
