//! # Checkout Session
//!
//! Owns the cart behind the checkout screen and the outcome of the last
//! "Rent" tap.
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI intent                 Session                     UI output        │
//! │  ─────────                 ───────                     ─────────        │
//! │                                                                         │
//! │  "+" / "-" on a row ─────► change_quantity(key, ±1) ─► CheckoutView     │
//! │                                                          (or ApiError   │
//! │                                                           INVALID_KEY)  │
//! │                                                                         │
//! │  screen (re)opens ───────► view() ───────────────────► CheckoutView     │
//! │                                                                         │
//! │  "Rent" ─────────────────► submit().await ───────────► SubmissionOutcome│
//! │                              │                          (also kept in   │
//! │                              └─► OrderSubmitter         last_submission)│
//! │                                                                         │
//! │  The cart survives every submit, successful or not.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use rental_core::{Cart, Catalog, OrderId, OrderSubmitter, PriceSummary, PricingTerms};

use crate::error::{ApiError, ErrorCode};

/// Result of the most recent submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "status", rename_all = "camelCase")]
#[ts(export)]
pub enum SubmissionOutcome {
    Submitted {
        #[serde(rename = "orderId")]
        order_id: OrderId,
    },
    Failed {
        code: ErrorCode,
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionOutcome::Submitted { .. })
    }
}

/// Everything the checkout screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutView {
    pub summary: PriceSummary,
    pub last_submission: Option<SubmissionOutcome>,
}

/// One checkout screen's worth of state.
#[derive(Debug)]
pub struct CheckoutSession {
    cart: Cart,
    terms: PricingTerms,
    submitter: OrderSubmitter,
    last_submission: Option<SubmissionOutcome>,
}

impl CheckoutSession {
    /// Opens a session with the given starting quantities.
    ///
    /// Fails with `INVALID_KEY` if the seed names an item the catalog lacks.
    pub fn new<I, K>(
        catalog: Arc<Catalog>,
        terms: PricingTerms,
        submitter: OrderSubmitter,
        seed: I,
    ) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let cart = Cart::with_quantities(catalog, seed)?;
        Ok(CheckoutSession {
            cart,
            terms,
            submitter,
            last_submission: None,
        })
    }

    /// Applies a `+`/`-` tap (or any delta) and returns the new view.
    pub fn change_quantity(&mut self, key: &str, delta: i64) -> Result<CheckoutView, ApiError> {
        match self.cart.change_quantity(key, delta) {
            Ok(quantity) => {
                debug!(key, delta, quantity, "Quantity intent applied");
                Ok(self.view())
            }
            Err(err) => {
                warn!(key, delta, error = %err, "Quantity intent for unknown item");
                Err(err.into())
            }
        }
    }

    /// Derives the current view.
    pub fn view(&self) -> CheckoutView {
        CheckoutView {
            summary: PriceSummary::for_cart(&self.cart, &self.terms),
            last_submission: self.last_submission.clone(),
        }
    }

    /// Submits the cart once. The outcome is also kept for `view()`.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        let outcome = match self.submitter.submit(&self.cart, &self.terms).await {
            Ok(order_id) => SubmissionOutcome::Submitted { order_id },
            Err(err) => {
                let api: ApiError = err.into();
                SubmissionOutcome::Failed {
                    code: api.code,
                    message: api.message,
                }
            }
        };

        self.last_submission = Some(outcome.clone());
        outcome
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn terms(&self) -> &PricingTerms {
        &self.terms
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_catalog, DEFAULT_SEED};
    use async_trait::async_trait;
    use rental_core::{EmptyOrderPolicy, Money, Order, OrderStore, StoreError};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out sequential ids, failing first with any scripted errors.
    #[derive(Default)]
    struct FakeStore {
        appended: Mutex<Vec<Order>>,
        failures: Mutex<VecDeque<StoreError>>,
    }

    impl FakeStore {
        fn failing_with(errors: Vec<StoreError>) -> Self {
            FakeStore {
                appended: Mutex::default(),
                failures: Mutex::new(errors.into()),
            }
        }

        fn appended(&self) -> Vec<Order> {
            self.appended.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderStore for FakeStore {
        async fn append(&self, order: &Order) -> Result<OrderId, StoreError> {
            if let Some(err) = self.failures.lock().unwrap().pop_front() {
                return Err(err);
            }
            let mut appended = self.appended.lock().unwrap();
            appended.push(order.clone());
            Ok(OrderId::new(format!("-N{}", appended.len())))
        }

        fn backend(&self) -> &'static str {
            "fake"
        }
    }

    fn session_with(store: Arc<FakeStore>) -> CheckoutSession {
        CheckoutSession::new(
            Arc::new(builtin_catalog().unwrap()),
            PricingTerms::default(),
            OrderSubmitter::new(store),
            DEFAULT_SEED,
        )
        .unwrap()
    }

    #[test]
    fn test_opening_view() {
        let session = session_with(Arc::new(FakeStore::default()));
        let view = session.view();

        assert_eq!(view.summary.monthly_total, Money::from_dollars(179));
        assert_eq!(view.summary.subtotal, Money::from_dollars(557));
        assert_eq!(view.summary.lines.len(), 3);
        assert!(view.last_submission.is_none());
    }

    #[test]
    fn test_change_quantity_updates_view() {
        let mut session = session_with(Arc::new(FakeStore::default()));

        let view = session.change_quantity("harper", -1).unwrap();
        assert_eq!(view.summary.monthly_total, Money::from_dollars(151));

        let view = session.change_quantity("harper", -5).unwrap();
        assert_eq!(view.summary.lines[2].quantity, 0);
        assert_eq!(view.summary.monthly_total, Money::from_dollars(123));
    }

    #[test]
    fn test_unknown_key_is_invalid_key_and_leaves_state() {
        let mut session = session_with(Arc::new(FakeStore::default()));
        let before = session.view();

        let err = session.change_quantity("recliner", 1).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidKey);
        assert_eq!(session.view(), before);
        assert!(session.view().last_submission.is_none());
    }

    #[tokio::test]
    async fn test_submit_success() {
        let store = Arc::new(FakeStore::default());
        let mut session = session_with(store.clone());

        let outcome = session.submit().await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Submitted {
                order_id: OrderId::new("-N1")
            }
        );
        assert_eq!(session.view().last_submission, Some(outcome));
        assert_eq!(store.appended()[0].subtotal(), Money::from_dollars(557));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_cart_and_allows_retry() {
        let store = Arc::new(FakeStore::failing_with(vec![StoreError::Timeout(
            "10s".into(),
        )]));
        let mut session = session_with(store.clone());
        let cart_before = session.cart().clone();

        let outcome = session.submit().await;

        match &outcome {
            SubmissionOutcome::Failed { code, .. } => {
                assert_eq!(*code, ErrorCode::StoreUnavailable)
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(session.cart(), &cart_before);
        assert!(store.appended().is_empty());

        let retry = session.submit().await;
        assert!(retry.is_submitted());
        assert_eq!(store.appended().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_submission() {
        let store = Arc::new(FakeStore::default());
        let mut session = session_with(store.clone());
        for (key, qty) in DEFAULT_SEED {
            session.change_quantity(key, -i64::from(qty)).unwrap();
        }

        let outcome = session.submit().await;
        assert!(matches!(
            outcome,
            SubmissionOutcome::Failed {
                code: ErrorCode::EmptyOrder,
                ..
            }
        ));
        assert!(store.appended().is_empty());

        let mut permissive = CheckoutSession::new(
            Arc::new(builtin_catalog().unwrap()),
            PricingTerms::default(),
            OrderSubmitter::new(store.clone()).with_empty_order_policy(EmptyOrderPolicy::Allow),
            Vec::<(&str, u32)>::new(),
        )
        .unwrap();
        assert!(permissive.submit().await.is_submitted());
    }

    #[test]
    fn test_view_json_shape() {
        let session = session_with(Arc::new(FakeStore::default()));
        let mut view = session.view();
        view.last_submission = Some(SubmissionOutcome::Submitted {
            order_id: OrderId::new("-N1"),
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["summary"]["subtotal"], 55_700);
        assert_eq!(json["lastSubmission"]["status"], "submitted");
        assert_eq!(json["lastSubmission"]["orderId"], "-N1");
    }
}
