//! # Domain Error Types
//!
//! Error types for the pricing and submission core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Each Error Surfaces                            │
//! │                                                                         │
//! │  change_quantity("sofa", +1)                                           │
//! │       │                                                                 │
//! │       └── CoreError::InvalidKey ──► local fault, logged, not shown     │
//! │                                     to the user (UI wiring bug)        │
//! │                                                                         │
//! │  Catalog::new(items)                                                   │
//! │       │                                                                 │
//! │       ├── CoreError::DuplicateKey                                      │
//! │       └── CoreError::Validation ──► bad catalog configuration          │
//! │                                                                         │
//! │  OrderSubmitter::submit(..)                                            │
//! │       │                                                                 │
//! │       └── SubmissionError (see `submission`) ──► user notification,    │
//! │                                                  cart kept for retry   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain-level errors from catalog and cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A quantity change or seed referenced a key that is not in the catalog.
    ///
    /// ## When This Occurs
    /// Only with a mis-wired UI: every button the UI renders comes from the
    /// catalog itself.
    #[error("Unknown catalog key: {key}")]
    InvalidKey { key: String },

    /// Two catalog items share the same key.
    #[error("Duplicate catalog key: {key}")]
    DuplicateKey { key: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidKey error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        CoreError::InvalidKey { key: key.into() }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while loading configuration (catalog records, pricing terms)
/// before any cart exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::invalid_key("sofa").to_string(),
            "Unknown catalog key: sofa"
        );
        assert_eq!(
            CoreError::DuplicateKey {
                key: "florence".to_string()
            }
            .to_string(),
            "Duplicate catalog key: florence"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "rental_period_months".to_string(),
            min: 1,
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "rental_period_months must be between 1 and 120"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "key".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
