//! # rental-core: Pure Business Logic for Rental Checkout
//!
//! This crate is the **heart** of the rental checkout. It holds the pricing
//! math and the order-submission rules with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rental Checkout Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (external)                       │   │
//! │  │    item rows (+ / -) ──► order summary ──► "Rent" button        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents / derived view                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/checkout (CheckoutSession)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rental-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │  │   cart   │  │ pricing  │  │  submission  │   │   │
//! │  │   │ Catalog  │  │   Cart   │  │  Terms   │  │ OrderSubmitter│  │   │
//! │  │   │   Item   │  │ (qty/key)│  │ Summary  │  │ OrderStore ◄─┼─┐ │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘ │ │   │
//! │  │                                                               │ │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                           │ │   │
//! │  └───────────────────────────────────────────────────────────────┼─┘   │
//! │                                                                  │      │
//! │  ┌───────────────────────────────────────────────────────────────┴─┐   │
//! │  │          rental-store (SQLite / HTTP / memory stores)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Catalog items and the validated catalog
//! - [`cart`] - Per-item quantities with a floor at zero
//! - [`pricing`] - Monthly total, subtotal, and the UI price summary
//! - [`order`] - Immutable order snapshot
//! - [`store`] - The `OrderStore` port
//! - [`submission`] - Submitting a cart through the port
//! - [`error`] / [`validation`] - Domain errors and configuration checks
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use rental_core::{compute_monthly_total, compute_subtotal, Cart, Catalog, CatalogItem, Money, PricingTerms};
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     CatalogItem::new("florence", "Florence Chair", Money::from_dollars(980), Money::from_dollars(45)),
//!     CatalogItem::new("hewitt", "Hewitt Chair", Money::from_dollars(897), Money::from_dollars(39)),
//!     CatalogItem::new("harper", "Harper Swivel Chair", Money::from_dollars(800), Money::from_dollars(28)),
//! ]).unwrap());
//!
//! let mut cart = Cart::with_quantities(catalog, [("florence", 1), ("hewitt", 2), ("harper", 2)]).unwrap();
//! assert_eq!(compute_monthly_total(&cart), Money::from_dollars(179));
//! assert_eq!(compute_subtotal(&cart, &PricingTerms::default()), Money::from_dollars(557));
//!
//! cart.change_quantity("harper", -5).unwrap(); // floors at zero
//! assert_eq!(cart.quantity("harper").unwrap(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod store;
pub mod submission;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, CatalogItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderId, OrderLineItem};
pub use pricing::{
    apply_terms, compute_line_total, compute_monthly_total, compute_subtotal, LineSummary,
    PriceSummary, PricingTerms,
};
pub use store::{OrderStore, StoreError};
pub use submission::{EmptyOrderPolicy, OrderSubmitter, SubmissionError};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rental period for this version of the flow.
pub const DEFAULT_RENTAL_PERIOD_MONTHS: u32 = 2;

/// Delivery and assembly fee for this version of the flow ($199.00).
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 19_900;

/// Longest rental period a configuration may set (ten years).
pub const MAX_RENTAL_PERIOD_MONTHS: u32 = 120;
