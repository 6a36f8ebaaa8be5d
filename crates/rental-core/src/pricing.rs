//! # Pricing
//!
//! Derives totals from a cart. Everything here is a pure recompute: same
//! cart and terms in, same numbers out.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  line_monthly_total = item.monthly_rate × quantity                      │
//! │                                                                         │
//! │  monthly_total      = Σ line_monthly_total   (every catalog item)       │
//! │                                                                         │
//! │  subtotal           = monthly_total × rental_period_months              │
//! │                       + delivery_fee                                    │
//! │                                                                         │
//! │  Example: florence 1 × $45, hewitt 2 × $39, harper 2 × $28              │
//! │           monthly_total = 45 + 78 + 56 = $179                           │
//! │           subtotal      = 179 × 2 + 199 = $557                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::CatalogItem;
use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_price_cents, validate_rental_period_months};
use crate::{DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_RENTAL_PERIOD_MONTHS};

// =============================================================================
// Pricing Terms
// =============================================================================

/// Fixed terms for this version of the checkout flow.
///
/// Not user-editable. Loaded from configuration at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingTerms {
    rental_period_months: u32,
    delivery_fee: Money,
}

impl PricingTerms {
    /// Creates validated pricing terms.
    ///
    /// ## Rules
    /// - `rental_period_months` in `1..=MAX_RENTAL_PERIOD_MONTHS`
    /// - `delivery_fee` non-negative
    pub fn new(rental_period_months: u32, delivery_fee: Money) -> CoreResult<Self> {
        validate_rental_period_months(rental_period_months)?;
        validate_price_cents("delivery_fee", delivery_fee.cents())?;

        Ok(PricingTerms {
            rental_period_months,
            delivery_fee,
        })
    }

    /// Rental period in months.
    #[inline]
    pub fn rental_period_months(&self) -> u32 {
        self.rental_period_months
    }

    /// One-time delivery and assembly fee.
    #[inline]
    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }
}

/// Defaults: 2 months, $199.00 delivery.
impl Default for PricingTerms {
    fn default() -> Self {
        PricingTerms {
            rental_period_months: DEFAULT_RENTAL_PERIOD_MONTHS,
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
        }
    }
}

// =============================================================================
// Calculations
// =============================================================================

/// Monthly cost of one line: `monthly_rate × quantity`.
#[inline]
pub fn compute_line_total(item: &CatalogItem, quantity: u32) -> Money {
    item.monthly_rate().times(quantity)
}

/// Sum of `quantity × monthly_rate` over every catalog item.
pub fn compute_monthly_total(cart: &Cart) -> Money {
    cart.lines()
        .map(|(item, quantity)| compute_line_total(item, quantity))
        .sum()
}

/// `monthly_total × rental_period_months + delivery_fee`.
///
/// Split out from [`compute_subtotal`] so an order snapshot can reuse the
/// monthly total it already summed from its own lines.
#[inline]
pub fn apply_terms(monthly_total: Money, terms: &PricingTerms) -> Money {
    monthly_total.times(terms.rental_period_months) + terms.delivery_fee
}

/// Total amount due for the cart under the given terms.
pub fn compute_subtotal(cart: &Cart, terms: &PricingTerms) -> Money {
    apply_terms(compute_monthly_total(cart), terms)
}

// =============================================================================
// Price Summary (UI output)
// =============================================================================

/// One rendered row of the checkout screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineSummary {
    pub key: String,
    pub name: String,
    pub unit_price: Money,
    pub monthly_rate: Money,
    pub quantity: u32,
    pub line_monthly_total: Money,
}

/// Everything the presentation layer needs to render the order summary.
///
/// ## Note
/// `lines` covers every catalog item, including zero quantities, so each
/// row keeps its counter on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceSummary {
    pub lines: Vec<LineSummary>,
    pub monthly_total: Money,
    pub rental_period_months: u32,
    pub delivery_fee: Money,
    pub subtotal: Money,
}

impl PriceSummary {
    /// Recomputes the summary for the cart's current state.
    pub fn for_cart(cart: &Cart, terms: &PricingTerms) -> Self {
        let lines: Vec<LineSummary> = cart
            .lines()
            .map(|(item, quantity)| LineSummary {
                key: item.key.clone(),
                name: item.name.clone(),
                unit_price: item.unit_price(),
                monthly_rate: item.monthly_rate(),
                quantity,
                line_monthly_total: compute_line_total(item, quantity),
            })
            .collect();

        let monthly_total: Money = lines.iter().map(|line| line.line_monthly_total).sum();

        PriceSummary {
            lines,
            monthly_total,
            rental_period_months: terms.rental_period_months(),
            delivery_fee: terms.delivery_fee(),
            subtotal: apply_terms(monthly_total, terms),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
