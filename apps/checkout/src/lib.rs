//! # Rental Checkout Library
//!
//! Headless checkout: configuration, store wiring, and the session the
//! presentation layer drives.
//!
//! ## Module Organization
//! ```text
//! rental_checkout/
//! ├── lib.rs          ◄─── You are here (startup wiring)
//! ├── cli.rs          ◄─── clap command line
//! ├── config.rs       ◄─── Environment configuration
//! ├── catalog.rs      ◄─── Built-in catalog, JSON catalog files, seed
//! ├── session.rs      ◄─── CheckoutSession, CheckoutView, SubmissionOutcome
//! └── error.rs        ◄─── ApiError type for the presentation layer
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()           RUST_LOG or "info,rental=debug,sqlx=warn"  │
//! │  2. CheckoutConfig::load()   RENTAL_* environment variables             │
//! │  3. catalog                  RENTAL_CATALOG_PATH or built-in chairs     │
//! │  4. connect_store(config)    sqlite (migrations) │ http │ memory        │
//! │  5. CheckoutSession::new     default seed quantities                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rental_core::{Catalog, OrderStore, OrderSubmitter};
use rental_store::{Database, DbConfig, HttpOrderStore, HttpStoreConfig, MemoryOrderStore};

use crate::cli::Command;
use crate::config::{CheckoutConfig, ConfigError, StoreBackend};
use crate::error::ApiError;
use crate::session::{CheckoutSession, CheckoutView};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rental=trace` - Show trace for the rental crates only
/// - Default: `info,rental=debug,sqlx=warn`
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rental=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configured catalog.
pub fn load_catalog(config: &CheckoutConfig) -> Result<Catalog, ApiError> {
    match &config.catalog_path {
        Some(path) => Ok(catalog::load_catalog(path)?),
        None => Ok(catalog::builtin_catalog()?),
    }
}

/// Builds the configured order store.
pub async fn connect_store(config: &CheckoutConfig) -> Result<Arc<dyn OrderStore>, ApiError> {
    let store: Arc<dyn OrderStore> = match config.store {
        StoreBackend::Sqlite => {
            let path = config.resolve_db_path()?;
            info!(?path, "Database path determined");
            let db = Database::new(DbConfig::new(path)).await?;
            Arc::new(db.orders())
        }
        StoreBackend::Http => {
            let url = config
                .store_url
                .clone()
                .ok_or_else(|| ConfigError::MissingRequired("RENTAL_STORE_URL".to_string()))?;
            let mut http = HttpStoreConfig::new(url)
                .collection(config.store_collection.clone())
                .timeout(config.store_timeout);
            if let Some(token) = &config.store_token {
                http = http.auth_token(token.clone());
            }
            Arc::new(HttpOrderStore::new(http)?)
        }
        StoreBackend::Memory => Arc::new(MemoryOrderStore::new()),
    };

    info!(backend = store.backend(), "Order store ready");
    Ok(store)
}

/// Opens a session on the given store with the default opening quantities.
pub fn open_session(
    config: &CheckoutConfig,
    catalog: Catalog,
    store: Arc<dyn OrderStore>,
) -> Result<CheckoutSession, ApiError> {
    let seed = catalog::default_seed(&catalog);
    let submitter = OrderSubmitter::new(store).with_empty_order_policy(config.empty_order_policy());

    CheckoutSession::new(Arc::new(catalog), config.terms, submitter, seed)
}

/// Runs one CLI command against a session and returns the resulting view.
pub async fn run(
    command: Command,
    session: &mut CheckoutSession,
) -> Result<CheckoutView, ApiError> {
    match command {
        Command::Summary => Ok(session.view()),
        Command::Order { changes, submit } => {
            for change in &changes {
                session.change_quantity(&change.key, change.delta)?;
            }
            if submit {
                session.submit().await;
            }
            Ok(session.view())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::QuantityChange;
    use crate::error::ErrorCode;
    use crate::session::SubmissionOutcome;
    use rental_core::Money;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CheckoutConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CheckoutConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
    }

    async fn session_for(config: &CheckoutConfig) -> CheckoutSession {
        let store = connect_store(config).await.unwrap();
        open_session(config, load_catalog(config).unwrap(), store).unwrap()
    }

    fn change(key: &str, delta: i64) -> QuantityChange {
        QuantityChange {
            key: key.to_string(),
            delta,
        }
    }

    #[tokio::test]
    async fn test_summary_command() {
        let config = config(&[("RENTAL_STORE", "memory")]);
        let mut session = session_for(&config).await;

        let view = run(Command::Summary, &mut session).await.unwrap();
        assert_eq!(view.summary.subtotal, Money::from_dollars(557));
    }

    #[tokio::test]
    async fn test_order_command_submits_to_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rental.db");
        let config = config(&[("RENTAL_DB_PATH", db_path.to_str().unwrap())]);
        let mut session = session_for(&config).await;

        let view = run(
            Command::Order {
                changes: vec![change("hewitt", 1), change("harper", -2)],
                submit: true,
            },
            &mut session,
        )
        .await
        .unwrap();

        assert_eq!(view.summary.monthly_total, Money::from_dollars(45 + 3 * 39));
        let order_id = match view.last_submission {
            Some(SubmissionOutcome::Submitted { order_id }) => order_id,
            other => panic!("expected submission, got {other:?}"),
        };

        let db = Database::new(DbConfig::new(&db_path)).await.unwrap();
        let stored = db.orders().get_by_id(&order_id).await.unwrap().unwrap();
        assert_eq!(stored.order.line_items().len(), 2);
    }

    #[tokio::test]
    async fn test_order_command_with_unknown_key() {
        let config = config(&[("RENTAL_STORE", "memory")]);
        let mut session = session_for(&config).await;

        let err = run(
            Command::Order {
                changes: vec![change("recliner", 1)],
                submit: true,
            },
            &mut session,
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidKey);
        assert!(session.view().last_submission.is_none());
    }

    #[tokio::test]
    async fn test_http_store_unreachable_is_reported_in_view() {
        let config = config(&[
            ("RENTAL_STORE", "http"),
            ("RENTAL_STORE_URL", "http://127.0.0.1:1"),
        ]);
        let mut session = session_for(&config).await;

        let view = run(
            Command::Order {
                changes: vec![],
                submit: true,
            },
            &mut session,
        )
        .await
        .unwrap();

        assert!(matches!(
            view.last_submission,
            Some(SubmissionOutcome::Failed {
                code: ErrorCode::StoreUnavailable,
                ..
            })
        ));
        assert_eq!(view.summary.subtotal, Money::from_dollars(557));
    }
}
