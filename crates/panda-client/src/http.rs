//! # HTTP Catalog Client
//!
//! [`CatalogClient`] over the backend's JSON API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                        Body               Answer          │
//! │  ──────  ──────────────────────────  ─────────────────  ─────────────── │
//! │  GET     /restaurants                -                  [Restaurant]    │
//! │  GET     /restaurants/{id}/menu      -                  [MenuItem]      │
//! │  POST    /orders                     OrderRequest       { total, .. }   │
//! │  POST    /seed                       { reset: bool }    (ignored)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Paths are appended to the configured base URL, so a base of
//! `https://host/api` serves `https://host/api/restaurants`. Restaurant ids
//! are percent-encoded as a single path segment.

use async_trait::async_trait;
use panda_core::{MenuItem, OrderConfirmation, OrderRequest, Restaurant};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use crate::catalog::CatalogClient;
use crate::config::ClientConfig;
use crate::error::{
    truncate_body, CheckoutError, CheckoutResult, ConfigError, ConfigResult, FetchError,
    FetchResult,
};

#[derive(Debug, Serialize)]
struct SeedRequest {
    reset: bool,
}

/// reqwest-backed catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> ConfigResult<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "Backend URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(HttpCatalogClient { http, base_url })
    }

    /// Creates a client from validated configuration.
    pub fn from_config(config: &ClientConfig) -> ConfigResult<Self> {
        config.validate()?;
        Self::new(&config.backend.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Infallible: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, resource: &str) -> FetchResult<T> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                resource: resource.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(%url, error = %e, "Catalog answered with an unexpected body");
            FetchError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_restaurants(&self) -> FetchResult<Vec<Restaurant>> {
        let url = self.endpoint(&["restaurants"]);
        self.get_json(url, "Restaurant list").await
    }

    async fn get_menu(&self, restaurant_id: &str) -> FetchResult<Vec<MenuItem>> {
        let url = self.endpoint(&["restaurants", restaurant_id, "menu"]);
        self.get_json(url, &format!("Menu for restaurant {}", restaurant_id))
            .await
    }

    async fn submit_order(&self, order: &OrderRequest) -> CheckoutResult<OrderConfirmation> {
        let url = self.endpoint(&["orders"]);
        debug!(%url, items = order.items.len(), "POST order");

        let response = self.http.post(url.clone()).json(order).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(%url, error = %e, "Order response has no usable total");
            CheckoutError::MalformedResponse(e.to_string())
        })
    }

    async fn ensure_seeded(&self, reset: bool) -> FetchResult<()> {
        let url = self.endpoint(&["seed"]);
        let response = self
            .http
            .post(url)
            .json(&SeedRequest { reset })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        info!(reset, "Backend seeded");
        Ok(())
    }
}
