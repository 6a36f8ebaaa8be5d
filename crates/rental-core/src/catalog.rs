//! # Catalog
//!
//! The fixed, ordered list of rentable items.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session start                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<CatalogItem> (built-in list or JSON file)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::new(items) ── validates every item, rejects duplicate keys   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<Catalog> ──► Cart ──► PriceSummary / Order snapshot               │
//! │                                                                         │
//! │  Read-only from here on. Nothing in the core mutates it.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_catalog_key, validate_item_name, validate_price_cents};

// =============================================================================
// Catalog Item
// =============================================================================

/// A rentable item and its pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier within the catalog (e.g. `"florence"`).
    pub key: String,

    /// Display name shown on the checkout screen.
    pub name: String,

    /// Purchase price in cents. Shown for reference; rentals are billed
    /// by the monthly rate.
    pub unit_price_cents: i64,

    /// Rental rate per month in cents.
    pub monthly_rate_cents: i64,
}

impl CatalogItem {
    /// Creates a catalog item.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        monthly_rate: Money,
    ) -> Self {
        CatalogItem {
            key: key.into(),
            name: name.into(),
            unit_price_cents: unit_price.cents(),
            monthly_rate_cents: monthly_rate.cents(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the monthly rate as Money.
    #[inline]
    pub fn monthly_rate(&self) -> Money {
        Money::from_cents(self.monthly_rate_cents)
    }

    fn validate(&self) -> CoreResult<()> {
        validate_catalog_key(&self.key)?;
        validate_item_name(&self.name)?;
        validate_price_cents("unit_price", self.unit_price_cents)?;
        validate_price_cents("monthly_rate", self.monthly_rate_cents)?;
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A validated, ordered catalog.
///
/// ## Invariants
/// - Keys are unique
/// - Every item passed validation
/// - Order is the order items were supplied in (the display order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from items, validating each and rejecting duplicate keys.
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::{Catalog, CatalogItem, Money};
    ///
    /// let catalog = Catalog::new(vec![CatalogItem::new(
    ///     "florence",
    ///     "Florence Chair",
    ///     Money::from_dollars(980),
    ///     Money::from_dollars(45),
    /// )])
    /// .unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn new(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());

        for item in &items {
            item.validate()?;
            if !seen.insert(item.key.as_str()) {
                return Err(CoreError::DuplicateKey {
                    key: item.key.clone(),
                });
            }
        }

        Ok(Catalog { items })
    }

    /// Returns the items in display order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Iterates over the items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }

    /// Looks up an item by key.
    pub fn get(&self, key: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Returns the display position of a key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn chair(key: &str, monthly: i64) -> CatalogItem {
        CatalogItem::new(
            key,
            format!("{key} chair"),
            Money::from_dollars(900),
            Money::from_dollars(monthly),
        )
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = Catalog::new(vec![chair("florence", 45), chair("hewitt", 39)]).unwrap();

        let keys: Vec<&str> = catalog.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["florence", "hewitt"]);
        assert_eq!(catalog.position("hewitt"), Some(1));
        assert_eq!(
            catalog.get("florence").map(|i| i.monthly_rate()),
            Some(Money::from_dollars(45))
        );
        assert!(catalog.get("harper").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicate_keys() {
        let err = Catalog::new(vec![chair("florence", 45), chair("florence", 39)]).unwrap_err();
        assert_eq!(
            err,
            CoreError::DuplicateKey {
                key: "florence".to_string()
            }
        );
    }

    #[test]
    fn test_catalog_rejects_invalid_items() {
        let mut negative = chair("hewitt", 39);
        negative.monthly_rate_cents = -1;
        let err = Catalog::new(vec![negative]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "monthly_rate"
        ));

        let mut unnamed = chair("harper", 28);
        unnamed.name = String::new();
        assert!(Catalog::new(vec![unnamed]).is_err());
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_item_json_shape() {
        let json = serde_json::to_value(chair("harper", 28)).unwrap();
        assert_eq!(json["key"], "harper");
        assert_eq!(json["monthlyRateCents"], 2800);
        assert_eq!(json["unitPriceCents"], 90_000);
    }
}
