//! # API Error Type
//!
//! Unified error type handed to the presentation layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Checkout                           │
//! │                                                                         │
//! │  Presentation layer           Rust                                      │
//! │  ──────────────────           ────                                      │
//! │                                                                         │
//! │  tap "+" on a row ────────►  session.change_quantity(key, +1)           │
//! │                                   │                                     │
//! │                                   ├── Ok(view)          ──► re-render   │
//! │                                   └── CoreError::InvalidKey             │
//! │                                         │  warn! (mis-wired UI)         │
//! │                                         ▼                               │
//! │                              ApiError { code: INVALID_KEY }             │
//! │                                                                         │
//! │  tap "Rent" ──────────────►  session.submit()                          │
//! │                                   │                                     │
//! │                                   └── SubmissionError                   │
//! │                                         │  warn!                        │
//! │                                         ▼                               │
//! │                              SubmissionOutcome::Failed { code, message }│
//! │                              (stored in the view, never thrown)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are written for the end user. Underlying causes go to the log.

use serde::Serialize;
use ts_rs::TS;

use rental_core::{CoreError, StoreError, SubmissionError};
use rental_store::DbError;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Error returned from session operations and CLI startup.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_KEY",
///   "message": "Unknown item: recliner"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Quantity change for a key that is not in the catalog
    InvalidKey,

    /// Input validation failed
    ValidationError,

    /// Submitted with every quantity at zero
    EmptyOrder,

    /// Order store unreachable or too slow (worth retrying)
    StoreUnavailable,

    /// Order store answered and refused the order
    StoreRejected,

    /// Order store answered with something unreadable
    StoreError,

    /// Bad environment or catalog file
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ConfigError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidKey { key } => {
                ApiError::new(ErrorCode::InvalidKey, format!("Unknown item: {key}"))
            }
            CoreError::DuplicateKey { key } => {
                ApiError::validation(format!("Item '{key}' is listed twice"))
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts store errors to user-facing API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) | StoreError::Timeout(_) => ApiError::new(
                ErrorCode::StoreUnavailable,
                "We couldn't reach the order service. Please try again.",
            ),
            StoreError::Rejected(_) => ApiError::new(
                ErrorCode::StoreRejected,
                "The order service declined this order.",
            ),
            StoreError::InvalidResponse(e) | StoreError::Serialization(e) => {
                tracing::error!("Order store exchange failed: {}", e);
                ApiError::new(ErrorCode::StoreError, "Your order could not be placed.")
            }
            StoreError::Internal(e) => {
                tracing::error!("Internal order store error: {}", e);
                ApiError::internal("Your order could not be placed.")
            }
        }
    }
}

/// Converts submission errors to API errors.
impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::EmptyOrder => ApiError::new(
                ErrorCode::EmptyOrder,
                "Add at least one item before renting.",
            ),
            SubmissionError::Store(e) => e.into(),
        }
    }
}

/// Converts database startup errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        tracing::error!("Database error: {}", err);
        StoreError::from(err).into()
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::config(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::config(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_code() {
        let err: ApiError = CoreError::invalid_key("recliner").into();
        assert_eq!(err.code, ErrorCode::InvalidKey);
        assert_eq!(err.message, "Unknown item: recliner");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_KEY");
    }

    #[test]
    fn test_transient_store_errors_share_a_code() {
        let unavailable: ApiError = StoreError::Unavailable("refused".into()).into();
        let timeout: ApiError = StoreError::Timeout("10s".into()).into();
        assert_eq!(unavailable.code, ErrorCode::StoreUnavailable);
        assert_eq!(unavailable, timeout);
    }

    #[test]
    fn test_submission_errors() {
        let empty: ApiError = SubmissionError::EmptyOrder.into();
        assert_eq!(empty.code, ErrorCode::EmptyOrder);

        let rejected: ApiError =
            SubmissionError::Store(StoreError::Rejected("401 Unauthorized".into())).into();
        assert_eq!(rejected.code, ErrorCode::StoreRejected);
        // The raw cause never reaches the user.
        assert!(!rejected.message.contains("401"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::config("Invalid value for RENTAL_STORE");
        assert_eq!(err.to_string(), "[ConfigError] Invalid value for RENTAL_STORE");
    }
}
