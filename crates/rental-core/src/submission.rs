//! # Order Submission
//!
//! Turns the current cart into an order and hands it to the store.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User taps "Rent"                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderSubmitter::submit(&cart, &terms) ← THIS MODULE                    │
//! │       │                                                                 │
//! │       ├── cart all zero + policy Reject? → Err(EmptyOrder)              │
//! │       │                                   (store never called)         │
//! │       │                                                                 │
//! │       ├── Order::snapshot(cart, terms, Utc::now())                      │
//! │       │                                                                 │
//! │       ├── store.append(&order).await   (exactly once, no retry)        │
//! │       │        │                                                        │
//! │       │        ├── Ok(id)  → Ok(id)                                     │
//! │       │        └── Err(e)  → Err(SubmissionError::Store(e))             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart untouched either way (&Cart). Retrying is the caller's choice.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::order::{Order, OrderId};
use crate::pricing::PricingTerms;
use crate::store::{OrderStore, StoreError};

// =============================================================================
// Empty Order Policy
// =============================================================================

/// What to do when every quantity is zero at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyOrderPolicy {
    /// Fail with `SubmissionError::EmptyOrder` before reaching the store.
    #[default]
    Reject,
    /// Submit a line-less order (delivery fee only).
    Allow,
}

// =============================================================================
// Submission Error
// =============================================================================

/// Why a submission did not produce an order id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The cart had no positive quantities and empty orders are rejected.
    #[error("Cannot submit an order with no items")]
    EmptyOrder,

    /// The store rejected the order or could not be reached.
    #[error("Order submission failed: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Order Submitter
// =============================================================================

/// Submits cart snapshots to an injected [`OrderStore`].
///
/// Holds no per-submission state: each `submit` call is independent, and
/// two calls with the same cart create two orders.
#[derive(Clone)]
pub struct OrderSubmitter {
    store: Arc<dyn OrderStore>,
    empty_orders: EmptyOrderPolicy,
}

impl OrderSubmitter {
    /// Creates a submitter with the default (reject) empty-order policy.
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        OrderSubmitter {
            store,
            empty_orders: EmptyOrderPolicy::default(),
        }
    }

    /// Sets the empty-order policy.
    pub fn with_empty_order_policy(mut self, policy: EmptyOrderPolicy) -> Self {
        self.empty_orders = policy;
        self
    }

    /// Returns the empty-order policy in effect.
    pub fn empty_order_policy(&self) -> EmptyOrderPolicy {
        self.empty_orders
    }

    /// Snapshots the cart and appends it to the store.
    ///
    /// ## Returns
    /// * `Ok(OrderId)` - the store accepted the order
    /// * `Err(SubmissionError::EmptyOrder)` - rejected by policy, store not called
    /// * `Err(SubmissionError::Store(_))` - the store failed; nothing was retried
    pub async fn submit(
        &self,
        cart: &Cart,
        terms: &PricingTerms,
    ) -> Result<OrderId, SubmissionError> {
        if cart.is_empty() && self.empty_orders == EmptyOrderPolicy::Reject {
            warn!("Refusing to submit an empty order");
            return Err(SubmissionError::EmptyOrder);
        }

        let order = Order::snapshot(cart, terms, Utc::now());
        debug!(
            backend = self.store.backend(),
            lines = order.line_items().len(),
            subtotal = %order.subtotal(),
            submitted_at = %order.submitted_at(),
            "Submitting order"
        );

        match self.store.append(&order).await {
            Ok(order_id) => {
                info!(
                    backend = self.store.backend(),
                    order_id = %order_id,
                    subtotal = %order.subtotal(),
                    "Order submitted"
                );
                Ok(order_id)
            }
            Err(err) => {
                warn!(backend = self.store.backend(), error = %err, "Order submission failed");
                Err(SubmissionError::Store(err))
            }
        }
    }
}

impl fmt::Debug for OrderSubmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderSubmitter")
            .field("backend", &self.store.backend())
            .field("empty_orders", &self.empty_orders)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogItem};
    use crate::money::Money;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::error::Error as _;
    use std::sync::Mutex;

    /// Records appended orders and replays scripted failures.
    #[derive(Default)]
    struct ScriptedStore {
        appended: Mutex<Vec<Order>>,
        failures: Mutex<VecDeque<StoreError>>,
    }

    impl ScriptedStore {
        fn failing_once(err: StoreError) -> Self {
            let store = ScriptedStore::default();
            store.failures.lock().unwrap().push_back(err);
            store
        }

        fn appended(&self) -> Vec<Order> {
            self.appended.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderStore for ScriptedStore {
        async fn append(&self, order: &Order) -> Result<OrderId, StoreError> {
            if let Some(err) = self.failures.lock().unwrap().pop_front() {
                return Err(err);
            }
            let mut appended = self.appended.lock().unwrap();
            appended.push(order.clone());
            Ok(OrderId::new(format!("order-{}", appended.len())))
        }

        fn backend(&self) -> &'static str {
            "scripted"
        }
    }

    fn cart_with(seed: &[(&str, u32)]) -> Cart {
        let catalog = Arc::new(
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
            .unwrap(),
        );
        Cart::with_quantities(catalog, seed.iter().copied()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_appends_snapshot() {
        let store = Arc::new(ScriptedStore::default());
        let submitter = OrderSubmitter::new(store.clone());
        let cart = cart_with(&[("florence", 1), ("hewitt", 2), ("harper", 2)]);

        let before = Utc::now();
        let id = submitter
            .submit(&cart, &PricingTerms::default())
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(id.as_str(), "order-1");
        let appended = store.appended();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].monthly_total(), Money::from_dollars(179));
        assert_eq!(appended[0].subtotal(), Money::from_dollars(557));
        assert!(appended[0].submitted_at() >= before && appended[0].submitted_at() <= after);
    }

    #[tokio::test]
    async fn test_repeated_submissions_create_distinct_orders() {
        let store = Arc::new(ScriptedStore::default());
        let submitter = OrderSubmitter::new(store.clone());
        let cart = cart_with(&[("hewitt", 1)]);

        let first = submitter.submit(&cart, &PricingTerms::default()).await.unwrap();
        let second = submitter.submit(&cart, &PricingTerms::default()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.appended().len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced_and_cart_unchanged() {
        let store = Arc::new(ScriptedStore::failing_once(StoreError::Unavailable(
            "connection refused".to_string(),
        )));
        let submitter = OrderSubmitter::new(store.clone());
        let cart = cart_with(&[("florence", 1), ("harper", 2)]);
        let before = cart.clone();

        let err = submitter
            .submit(&cart, &PricingTerms::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::Store(StoreError::Unavailable("connection refused".to_string()))
        );
        assert!(err.source().is_some());
        assert_eq!(cart, before);
        assert!(store.appended().is_empty());

        // No automatic retry happened; an explicit second attempt goes through.
        let id = submitter.submit(&cart, &PricingTerms::default()).await.unwrap();
        assert_eq!(id.as_str(), "order-1");
    }

    #[tokio::test]
    async fn test_empty_cart_rejected_by_default() {
        let store = Arc::new(ScriptedStore::default());
        let submitter = OrderSubmitter::new(store.clone());

        let err = submitter
            .submit(&cart_with(&[]), &PricingTerms::default())
            .await
            .unwrap_err();

        assert_eq!(err, SubmissionError::EmptyOrder);
        assert!(store.appended().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_allowed_by_policy() {
        let store = Arc::new(ScriptedStore::default());
        let submitter =
            OrderSubmitter::new(store.clone()).with_empty_order_policy(EmptyOrderPolicy::Allow);

        submitter
            .submit(&cart_with(&[]), &PricingTerms::default())
            .await
            .unwrap();

        let appended = store.appended();
        assert!(appended[0].is_empty());
        assert_eq!(appended[0].subtotal(), Money::from_dollars(199));
    }

    #[test]
    fn test_debug_names_backend() {
        let submitter = OrderSubmitter::new(Arc::new(ScriptedStore::default()));
        let debug = format!("{submitter:?}");
        assert!(debug.contains("scripted"));
        assert!(debug.contains("Reject"));
    }
}
