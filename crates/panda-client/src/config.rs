//! # Client Configuration
//!
//! Where the backend lives and who is ordering.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOODPANDA_BACKEND_URL=http://api.local:8000                        │
//! │     FOODPANDA_EMAIL=ayesha@example.com                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/client/client.toml (Linux)                               │
//! │     ~/Library/Application Support/com.foodpanda.client/client.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000, guest@example.com, 123 Main St              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [backend]
//! base_url = "http://localhost:8000"
//! timeout_secs = 10
//! seed_on_start = true
//!
//! [customer]
//! email = "guest@example.com"
//! address = "123 Main St"
//! ```

use panda_core::{Customer, DEFAULT_CUSTOMER_EMAIL, DEFAULT_DELIVERY_ADDRESS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

// =============================================================================
// Backend Settings
// =============================================================================

/// How to reach the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Ask the backend to seed demo data (without reset) on start.
    #[serde(default = "default_true")]
    pub seed_on_start: bool,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            seed_on_start: true,
        }
    }
}

// =============================================================================
// Customer Settings
// =============================================================================

/// Identity the ordering screen starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSettings {
    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_address")]
    pub address: String,
}

fn default_email() -> String {
    DEFAULT_CUSTOMER_EMAIL.to_string()
}

fn default_address() -> String {
    DEFAULT_DELIVERY_ADDRESS.to_string()
}

impl Default for CustomerSettings {
    fn default() -> Self {
        CustomerSettings {
            email: default_email(),
            address: default_address(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub customer: CustomerSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.base_url()?;

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "backend.timeout_secs".into(),
                value: "0".into(),
            });
        }

        Ok(())
    }

    /// Parses the backend base URL. Only http and https are accepted.
    pub fn base_url(&self) -> ConfigResult<Url> {
        let url = Url::parse(self.backend.base_url.trim())?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "Backend URL must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        Ok(url)
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// The configured customer identity.
    pub fn customer(&self) -> Customer {
        Customer::new(&self.customer.email, &self.customer.address)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `FOODPANDA_*` overrides read through `lookup`.
    ///
    /// Values that do not parse are logged and skipped.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FOODPANDA_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Some(timeout) = lookup("FOODPANDA_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.backend.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric FOODPANDA_TIMEOUT_SECS"),
            }
        }

        if let Some(seed) = lookup("FOODPANDA_SEED_ON_START") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.backend.seed_on_start = true,
                "0" | "false" | "no" | "off" => self.backend.seed_on_start = false,
                _ => warn!(value = %seed, "Unknown FOODPANDA_SEED_ON_START value"),
            }
        }

        if let Some(email) = lookup("FOODPANDA_EMAIL") {
            self.customer.email = email;
        }

        if let Some(address) = lookup("FOODPANDA_ADDRESS") {
            self.customer.address = address;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "foodpanda", "client")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.backend.seed_on_start);
        assert_eq!(config.customer(), Customer::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.backend.base_url = "ws://localhost:8000".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.backend.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.backend.base_url = "https://api.example.com/v1/".to_string();
        assert!(config.validate().is_ok());

        config.backend.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClientConfig::default();
        config.apply_overrides(lookup_from(&[
            ("FOODPANDA_BACKEND_URL", "http://10.0.0.5:9000"),
            ("FOODPANDA_TIMEOUT_SECS", "3"),
            ("FOODPANDA_SEED_ON_START", "false"),
            ("FOODPANDA_EMAIL", "ayesha@example.com"),
            ("FOODPANDA_ADDRESS", "7 Mall Road"),
        ]));

        assert_eq!(config.backend.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(!config.backend.seed_on_start);
        assert_eq!(
            config.customer(),
            Customer::new("ayesha@example.com", "7 Mall Road")
        );
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ClientConfig::default();
        config.apply_overrides(lookup_from(&[
            ("FOODPANDA_TIMEOUT_SECS", "soon"),
            ("FOODPANDA_SEED_ON_START", "maybe"),
        ]));

        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.backend.seed_on_start);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://127.0.0.1:8123"
seed_on_start = false

[customer]
email = "bilal@example.com"
"#,
        )
        .unwrap();

        let config = ClientConfig::load(Some(path)).unwrap();

        assert_eq!(config.backend.base_url, "http://127.0.0.1:8123");
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(!config.backend.seed_on_start);
        assert_eq!(config.customer.email, "bilal@example.com");
        assert_eq!(config.customer.address, "123 Main St");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "[backend\nbase_url = ").unwrap();

        assert!(matches!(
            ClientConfig::load(Some(path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[customer]"));
    }
}
