//! # rental-store: Order Store Adapters
//!
//! Implementations of [`rental_core::OrderStore`]: a local SQLite database,
//! a remote JSON collection over HTTP, and an in-memory store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rental Checkout Data Flow                        │
//! │                                                                         │
//! │  OrderSubmitter::submit (rental-core)                                  │
//! │       │  store.append(&order)                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  rental-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SqliteOrder-  │    │ HttpOrder-    │    │ MemoryOrder- │  │   │
//! │  │   │ Store         │    │ Store         │    │ Store        │  │   │
//! │  │   │ (repository/) │    │ (http.rs)     │    │ (memory.rs)  │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │                    │                               │   │
//! │  └───────────┼────────────────────┼───────────────────────────────┘   │
//! │              ▼                    ▼                                    │
//! │      SQLite (WAL, pool.rs)   POST {base}/{collection}.json            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and their `StoreError` mapping
//! - [`repository`] - SQLite order store
//! - [`http`] - Remote collection store
//! - [`memory`] - In-memory store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rental_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/rental.db")).await?;
//! let store: Arc<dyn OrderStore> = Arc::new(db.orders());
//! let submitter = OrderSubmitter::new(store);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod http;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use http::{HttpOrderStore, HttpStoreConfig};
pub use memory::MemoryOrderStore;
pub use pool::{Database, DbConfig};
pub use repository::{SqliteOrderStore, StoredOrder};
