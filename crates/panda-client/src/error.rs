//! # Client Error Types
//!
//! Error types for collaborator calls and the ordering session.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   FetchError    │  │  CheckoutError  │  │     ConfigError         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Transport      │  │  Transport      │  │  Io                     │ │
//! │  │  Status         │  │  Rejected       │  │  Parse                  │ │
//! │  │  NotFound       │  │  Malformed...   │  │  InvalidValue           │ │
//! │  │  Decode         │  │  Inconsistent.. │  │  InvalidUrl             │ │
//! │  │  UnknownRest... │  │  InvalidCustomer│  │  HttpClient             │ │
//! │  └────────┬────────┘  └────────┬────────┘  └────────────┬────────────┘ │
//! │           │                    │                        │              │
//! │           └────────────────────┼────────────────────────┘              │
//! │                                ▼                                        │
//! │                          ClientError  (+ CoreError)                     │
//! │                     what OrderingSession returns                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A checkout that is skipped (no restaurant open, empty cart, submission
//! already in flight) is NOT an error: see
//! [`CheckoutOutcome::Skipped`](crate::checkout::CheckoutOutcome).

use panda_core::{CoreError, ValidationError};
use thiserror::Error;

/// Longest response body kept in an error, in bytes.
const MAX_ERROR_BODY: usize = 512;

pub type FetchResult<T> = Result<T, FetchError>;
pub type CheckoutResult<T> = Result<T, CheckoutError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Fetch Errors
// =============================================================================

/// Listing or menu fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Backend unreachable, connection reset, timeout.
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// Backend answered with an error status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered 404 for the requested resource.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Backend answered 2xx with a body that is not the expected JSON.
    #[error("Unexpected catalog response: {0}")]
    Decode(String),

    /// The restaurant id is not in the loaded restaurant list.
    #[error("Restaurant {0} is not in the restaurant list")]
    UnknownRestaurant(String),
}

impl FetchError {
    /// Returns true if trying the same fetch again may succeed.
    ///
    /// ## Retryable Errors
    /// - Transport failures
    /// - 5xx statuses
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Checkout Errors
// =============================================================================

/// Order submission failed. No order is recorded client-side and nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Backend unreachable while submitting. The order may or may not have
    /// been created.
    #[error("Order submission failed: {0}")]
    Transport(String),

    /// Backend refused the order.
    #[error("Order rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Backend accepted the request but the answer has no numeric `total`.
    #[error("Malformed order response: {0}")]
    MalformedResponse(String),

    /// A cart line does not belong to the open restaurant.
    #[error("Cart does not match the open restaurant: {0}")]
    InconsistentCart(#[source] CoreError),

    /// Email or address was left blank.
    #[error("Invalid customer details: {0}")]
    InvalidCustomer(#[from] ValidationError),
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CheckoutError::MalformedResponse(err.to_string())
        } else {
            CheckoutError::Transport(err.to_string())
        }
    }
}

impl From<CoreError> for CheckoutError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => CheckoutError::InvalidCustomer(e),
            other => CheckoutError::InconsistentCart(other),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(String),

    /// Config file is not valid TOML for [`ClientConfig`](crate::config::ClientConfig).
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Session Error
// =============================================================================

/// Error returned by [`OrderingSession`](crate::session::OrderingSession)
/// intents. Every variant is recoverable: the session state is left as it
/// was before the failed intent.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Cuts a response body down to something fit for an error message.
pub(crate) fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
