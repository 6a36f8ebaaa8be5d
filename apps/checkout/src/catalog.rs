//! # Catalog Sources
//!
//! The built-in chair catalog, JSON catalog files, and the opening
//! quantities of the checkout screen.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use rental_core::{Catalog, CatalogItem, CoreError, CoreResult, Money};

/// Quantities the checkout screen opens with.
pub const DEFAULT_SEED: [(&str, u32); 3] = [("florence", 1), ("hewitt", 2), ("harper", 2)];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Could not read catalog {path}: {message}")]
    Read { path: String, message: String },

    #[error("Catalog {path} is not valid JSON: {message}")]
    Parse { path: String, message: String },

    #[error("Catalog {path} is invalid: {source}")]
    Invalid {
        path: String,
        #[source]
        source: CoreError,
    },
}

/// The three chairs of the launch catalog.
pub fn builtin_catalog() -> CoreResult<Catalog> {
    Catalog::new(vec![
        CatalogItem::new(
            "florence",
            "Florence Chair",
            Money::from_dollars(980),
            Money::from_dollars(45),
        ),
        CatalogItem::new(
            "hewitt",
            "Hewitt Chair",
            Money::from_dollars(897),
            Money::from_dollars(39),
        ),
        CatalogItem::new(
            "harper",
            "Harper Swivel Chair",
            Money::from_dollars(800),
            Money::from_dollars(28),
        ),
    ])
}

/// Reads a catalog file: `[{ "key", "name", "unitPriceCents", "monthlyRateCents" }]`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let shown = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: shown.clone(),
        message: e.to_string(),
    })?;
    let items: Vec<CatalogItem> = serde_json::from_str(&raw).map_err(|e| CatalogError::Parse {
        path: shown.clone(),
        message: e.to_string(),
    })?;
    let catalog = Catalog::new(items).map_err(|source| CatalogError::Invalid {
        path: shown.clone(),
        source,
    })?;

    info!(path = %shown, items = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// The default seed restricted to keys the catalog actually has.
pub fn default_seed(catalog: &Catalog) -> Vec<(&'static str, u32)> {
    DEFAULT_SEED
        .iter()
        .copied()
        .filter(|(key, _)| catalog.get(key).is_some())
        .collect()
}
