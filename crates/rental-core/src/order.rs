//! # Order Snapshot
//!
//! The immutable record sent to the order store.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart (mutable, session-owned)                                          │
//! │    florence 1 │ hewitt 0 │ harper 2                                     │
//! │       │                                                                 │
//! │       │  Order::snapshot(cart, terms, now)                              │
//! │       ▼                                                                 │
//! │  Order (immutable)                                                      │
//! │    line_items:   [florence × 1, harper × 2]   ← quantity > 0 only      │
//! │    monthly_total, rental_period_months, delivery_fee, subtotal          │
//! │    submitted_at                                                         │
//! │                                                                         │
//! │  Item names and rates are copied in, so the stored order keeps the     │
//! │  prices the customer saw even if the catalog changes later.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::CatalogItem;
use crate::money::Money;
use crate::pricing::{apply_terms, compute_line_total, PricingTerms};

// =============================================================================
// Order Id
// =============================================================================

/// Identifier assigned by the order store.
///
/// Opaque to the core: UUIDs from the SQLite store, push ids from a remote
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct OrderId(String);

impl OrderId {
    /// Wraps a store-generated identifier.
    pub fn new(id: impl Into<String>) -> Self {
        OrderId(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        OrderId(id)
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// A positive-quantity line, frozen at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLineItem {
    /// Catalog key at time of submission (frozen).
    pub key: String,
    /// Item name at time of submission (frozen).
    pub name: String,
    pub unit_price: Money,
    pub monthly_rate: Money,
    pub quantity: u32,
    /// `monthly_rate × quantity`.
    pub line_monthly_total: Money,
}

impl OrderLineItem {
    /// Freezes a catalog item and quantity into a line.
    pub fn from_catalog(item: &CatalogItem, quantity: u32) -> Self {
        OrderLineItem {
            key: item.key.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price(),
            monthly_rate: item.monthly_rate(),
            quantity,
            line_monthly_total: compute_line_total(item, quantity),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted rental order.
///
/// ## Invariants
/// - Every line has `quantity > 0`
/// - `monthly_total` is the sum of the lines' `line_monthly_total`
/// - `subtotal = monthly_total × rental_period_months + delivery_fee`
/// - Fields are private: once built, an order cannot be edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    line_items: Vec<OrderLineItem>,
    monthly_total: Money,
    rental_period_months: u32,
    delivery_fee: Money,
    subtotal: Money,
    #[ts(as = "String")]
    submitted_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order from the cart's current state.
    ///
    /// Zero-quantity items are left out. An all-zero cart produces an order
    /// with no lines (whether that may be submitted is the submitter's call).
    pub fn snapshot(cart: &Cart, terms: &PricingTerms, submitted_at: DateTime<Utc>) -> Self {
        let line_items = cart
            .positive_lines()
            .map(|(item, quantity)| OrderLineItem::from_catalog(item, quantity))
            .collect();

        Order::from_lines(line_items, terms, submitted_at)
    }

    /// Rebuilds an order from stored lines, recomputing every total.
    ///
    /// Lines with a zero quantity are dropped, so the invariants hold no
    /// matter what the source held.
    pub fn from_lines(
        line_items: Vec<OrderLineItem>,
        terms: &PricingTerms,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let line_items: Vec<OrderLineItem> = line_items
            .into_iter()
            .filter(|line| line.quantity > 0)
            .map(|line| OrderLineItem {
                line_monthly_total: line.monthly_rate.times(line.quantity),
                ..line
            })
            .collect();

        let monthly_total: Money = line_items.iter().map(|l| l.line_monthly_total).sum();

        Order {
            line_items,
            monthly_total,
            rental_period_months: terms.rental_period_months(),
            delivery_fee: terms.delivery_fee(),
            subtotal: apply_terms(monthly_total, terms),
            submitted_at,
        }
    }

    pub fn line_items(&self) -> &[OrderLineItem] {
        &self.line_items
    }

    pub fn monthly_total(&self) -> Money {
        self.monthly_total
    }

    pub fn rental_period_months(&self) -> u32 {
        self.rental_period_months
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Checks if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
