//! Checkout configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Serialize;

use rental_core::{
    EmptyOrderPolicy, Money, PricingTerms, DEFAULT_DELIVERY_FEE_CENTS,
    DEFAULT_RENTAL_PERIOD_MONTHS,
};

/// Which order store the session submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sqlite,
    Http,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "http" => Ok(StoreBackend::Http),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue("RENTAL_STORE".to_string())),
        }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutConfig {
    /// Order store backend
    pub store: StoreBackend,

    /// SQLite file (platform data dir when unset)
    pub db_path: Option<PathBuf>,

    /// Remote collection base URL (required for `http`)
    pub store_url: Option<String>,

    /// Remote collection name
    pub store_collection: String,

    /// Remote auth token
    #[serde(skip_serializing)]
    pub store_token: Option<String>,

    /// HTTP request timeout
    pub store_timeout: Duration,

    /// Rental period and delivery fee
    pub terms: PricingTerms,

    /// Submit carts with every quantity at zero
    pub allow_empty_orders: bool,

    /// JSON catalog file replacing the built-in one
    pub catalog_path: Option<PathBuf>,
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        CheckoutConfig::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store: StoreBackend = lookup("RENTAL_STORE")
            .unwrap_or_else(|| "sqlite".to_string())
            .parse()?;

        let store_timeout_secs: u64 = lookup("RENTAL_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("RENTAL_STORE_TIMEOUT_SECS".to_string()))?;
        if store_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("RENTAL_STORE_TIMEOUT_SECS".to_string()));
        }

        let months: u32 = lookup("RENTAL_PERIOD_MONTHS")
            .unwrap_or_else(|| DEFAULT_RENTAL_PERIOD_MONTHS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("RENTAL_PERIOD_MONTHS".to_string()))?;

        let fee_cents: i64 = lookup("RENTAL_DELIVERY_FEE_CENTS")
            .unwrap_or_else(|| DEFAULT_DELIVERY_FEE_CENTS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("RENTAL_DELIVERY_FEE_CENTS".to_string()))?;

        let terms = PricingTerms::new(months, Money::from_cents(fee_cents)).map_err(|_| {
            if fee_cents < 0 {
                ConfigError::InvalidValue("RENTAL_DELIVERY_FEE_CENTS".to_string())
            } else {
                ConfigError::InvalidValue("RENTAL_PERIOD_MONTHS".to_string())
            }
        })?;

        let allow_empty_orders = match lookup("RENTAL_ALLOW_EMPTY_ORDERS") {
            None => false,
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("RENTAL_ALLOW_EMPTY_ORDERS".to_string()))?,
        };

        let config = CheckoutConfig {
            store,
            db_path: lookup("RENTAL_DB_PATH").map(PathBuf::from),
            store_url: lookup("RENTAL_STORE_URL").filter(|url| !url.trim().is_empty()),
            store_collection: lookup("RENTAL_STORE_COLLECTION")
                .unwrap_or_else(|| "orders".to_string()),
            store_token: lookup("RENTAL_STORE_TOKEN").filter(|token| !token.is_empty()),
            store_timeout: Duration::from_secs(store_timeout_secs),
            terms,
            allow_empty_orders,
            catalog_path: lookup("RENTAL_CATALOG_PATH").map(PathBuf::from),
        };

        if config.store == StoreBackend::Http && config.store_url.is_none() {
            return Err(ConfigError::MissingRequired("RENTAL_STORE_URL".to_string()));
        }

        Ok(config)
    }

    /// Empty-order policy implied by `allow_empty_orders`.
    pub fn empty_order_policy(&self) -> EmptyOrderPolicy {
        if self.allow_empty_orders {
            EmptyOrderPolicy::Allow
        } else {
            EmptyOrderPolicy::Reject
        }
    }

    /// Resolves the SQLite path, creating the platform data dir if needed.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.rental.checkout/rental.db`
    /// - **Windows**: `%APPDATA%\rental\checkout\data\rental.db`
    /// - **Linux**: `~/.local/share/checkout/rental.db`
    pub fn resolve_db_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "rental", "checkout")
            .ok_or_else(|| ConfigError::MissingRequired("RENTAL_DB_PATH".to_string()))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| ConfigError::DataDir(format!("{}: {e}", data_dir.display())))?;

        Ok(data_dir.join("rental.db"))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Could not create data directory {0}")]
    DataDir(String),
}
