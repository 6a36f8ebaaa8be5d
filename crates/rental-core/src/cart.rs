//! # Cart
//!
//! Per-item quantities for the current checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Intent               Cart Call                  State Change        │
//! │  ─────────               ─────────                  ────────────        │
//! │                                                                         │
//! │  Tap "+" ──────────────► change_quantity(k, +1) ──► qty[k] += 1        │
//! │                                                                         │
//! │  Tap "-" ──────────────► change_quantity(k, -1) ──► qty[k] =           │
//! │                                                      max(0, qty[k]-1)   │
//! │                                                                         │
//! │  Render row ───────────► quantity(k) / lines() ───► (read only)        │
//! │                                                                         │
//! │  NOTE: Every catalog key always has a slot. Quantity 0 is a valid,     │
//! │        rendered state, not a removed line.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, CatalogItem};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::compute_monthly_total;

/// The checkout cart.
///
/// ## Invariants
/// - One quantity slot per catalog item, in catalog order
/// - Quantities are `u32`, so never negative
/// - Only `change_quantity` mutates a quantity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    catalog: Arc<Catalog>,
    quantities: Vec<u32>,
}

impl Cart {
    /// Creates a cart with every quantity at zero.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let quantities = vec![0; catalog.len()];
        Cart {
            catalog,
            quantities,
        }
    }

    /// Creates a cart with seeded starting quantities.
    ///
    /// Keys not mentioned in `seed` start at zero.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use rental_core::{Cart, Catalog, CatalogItem, Money};
    ///
    /// let catalog = Arc::new(Catalog::new(vec![
    ///     CatalogItem::new("florence", "Florence Chair", Money::from_dollars(980), Money::from_dollars(45)),
    ///     CatalogItem::new("hewitt", "Hewitt Chair", Money::from_dollars(897), Money::from_dollars(39)),
    /// ]).unwrap());
    ///
    /// let cart = Cart::with_quantities(catalog, [("hewitt", 2)]).unwrap();
    /// assert_eq!(cart.quantity("florence").unwrap(), 0);
    /// assert_eq!(cart.quantity("hewitt").unwrap(), 2);
    /// ```
    pub fn with_quantities<I, K>(catalog: Arc<Catalog>, seed: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut cart = Cart::new(catalog);
        for (key, quantity) in seed {
            *cart.slot_mut(key.as_ref())? = quantity;
        }
        Ok(cart)
    }

    /// Returns the catalog this cart prices against.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Returns the current quantity for a key.
    pub fn quantity(&self, key: &str) -> CoreResult<u32> {
        self.catalog
            .position(key)
            .and_then(|idx| self.quantities.get(idx).copied())
            .ok_or_else(|| CoreError::invalid_key(key))
    }

    /// Applies a quantity delta to one item.
    ///
    /// ## Behavior
    /// - New quantity is `max(0, current + delta)`
    /// - Decrementing an item already at 0 leaves it at 0 (not an error)
    /// - Saturates at `u32::MAX` instead of wrapping
    /// - Unknown key: `CoreError::InvalidKey`, cart unchanged
    ///
    /// ## Returns
    /// The item's new quantity.
    pub fn change_quantity(&mut self, key: &str, delta: i64) -> CoreResult<u32> {
        let slot = self.slot_mut(key)?;

        let next = i64::from(*slot)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        let next = u32::try_from(next).unwrap_or(u32::MAX);

        debug!(key, delta, from = *slot, to = next, "Quantity changed");
        *slot = next;
        Ok(next)
    }

    /// Iterates over every catalog item with its quantity, in catalog order.
    ///
    /// Includes zero-quantity items.
    pub fn lines(&self) -> impl Iterator<Item = (&CatalogItem, u32)> + '_ {
        self.catalog.iter().zip(self.quantities.iter().copied())
    }

    /// Iterates over items with a positive quantity, in catalog order.
    pub fn positive_lines(&self) -> impl Iterator<Item = (&CatalogItem, u32)> + '_ {
        self.lines().filter(|(_, quantity)| *quantity > 0)
    }

    /// Returns the total number of units across all items.
    pub fn total_quantity(&self) -> u64 {
        self.quantities.iter().map(|&q| u64::from(q)).sum()
    }

    /// Checks if every quantity is zero.
    pub fn is_empty(&self) -> bool {
        self.quantities.iter().all(|&q| q == 0)
    }

    /// Shorthand for [`compute_monthly_total`].
    pub fn monthly_total(&self) -> Money {
        compute_monthly_total(self)
    }

    fn slot_mut(&mut self, key: &str) -> CoreResult<&mut u32> {
        self.catalog
            .position(key)
            .and_then(|idx| self.quantities.get_mut(idx))
            .ok_or_else(|| CoreError::invalid_key(key))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
