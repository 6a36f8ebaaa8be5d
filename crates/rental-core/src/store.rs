//! # Order Store Port
//!
//! The only contract the core has with persistence: append an order, get an
//! id back, or fail.
//!
//! ## Dependency Direction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  rental-core                         rental-store                       │
//! │  ───────────                         ────────────                       │
//! │  OrderSubmitter                                                         │
//! │       │ uses                                                            │
//! │       ▼                                                                 │
//! │  trait OrderStore ◄──── implements ── SqliteOrderStore                  │
//! │                   ◄──── implements ── HttpOrderStore                    │
//! │                   ◄──── implements ── MemoryOrderStore                  │
//! │                                                                         │
//! │  The core never names a concrete store. Ordering, id generation and    │
//! │  concurrency are the store's business.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::order::{Order, OrderId};

/// An append-only collection of orders.
///
/// ## Contract
/// - `append` persists the order at most once per call
/// - The store assigns the id; repeated calls with equal orders yield
///   distinct ids
/// - Failure means nothing the caller can rely on was persisted
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Appends an order and returns its store-assigned id.
    async fn append(&self, order: &Order) -> Result<OrderId, StoreError>;

    /// Short backend name for logs (`"sqlite"`, `"http"`, ...).
    fn backend(&self) -> &'static str;
}

/// Why a store could not accept an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, DNS, closed pool).
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer in time.
    #[error("Order store timed out: {0}")]
    Timeout(String),

    /// The store answered and refused the order.
    #[error("Order store rejected the order: {0}")]
    Rejected(String),

    /// The store answered but the generated id could not be read.
    #[error("Order store returned an invalid response: {0}")]
    InvalidResponse(String),

    /// The order could not be encoded for the store.
    #[error("Order could not be serialized: {0}")]
    Serialization(String),

    /// Anything else.
    #[error("Order store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether trying again later could plausibly succeed.
    ///
    /// Nothing in the core retries; this is for the caller deciding what
    /// to tell the user.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}
