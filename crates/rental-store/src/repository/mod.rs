//! # Repository Module
//!
//! SQLite repositories for the checkout.
//!
//! ## Available Repositories
//!
//! - [`SqliteOrderStore`] - Transactional order inserts plus read-back
//!   helpers for diagnostics

pub mod order;

pub use order::{SqliteOrderStore, StoredOrder};
