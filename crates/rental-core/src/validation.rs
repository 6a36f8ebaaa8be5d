//! # Validation Module
//!
//! Validation for the configuration the core is built from: catalog records
//! and pricing terms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config loading (apps/checkout)                               │
//! │  ├── Env var parsing, JSON catalog deserialization                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Catalog keys, names, prices                                       │
//! │  └── Rental period, delivery fee                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  └── u32 quantities cannot go negative                                 │
//! │                                                                         │
//! │  Everything is checked once at session start, never per intent.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::validation::{validate_catalog_key, validate_rental_period_months};
//!
//! assert!(validate_catalog_key("florence").is_ok());
//! assert!(validate_rental_period_months(2).is_ok());
//! ```

use crate::error::ValidationError;
use crate::MAX_RENTAL_PERIOD_MONTHS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_KEY_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog key.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Lowercase ASCII letters, digits, hyphens, underscores only
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_catalog_key;
///
/// assert!(validate_catalog_key("harper").is_ok());
/// assert!(validate_catalog_key("").is_err());
/// assert!(validate_catalog_key("Harper Chair").is_err());
/// ```
pub fn validate_catalog_key(key: &str) -> ValidationResult<()> {
    if key.is_empty() {
        return Err(ValidationError::Required {
            field: "key".to_string(),
        });
    }

    if key.len() > MAX_KEY_LEN {
        return Err(ValidationError::TooLong {
            field: "key".to_string(),
            max: MAX_KEY_LEN,
        });
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "key".to_string(),
            reason: "must contain only lowercase letters, numbers, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price or rate in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, waived delivery)
///
/// ## Example
/// ```rust
/// use rental_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("monthly_rate", 4500).is_ok());
/// assert!(validate_price_cents("delivery_fee", 0).is_ok());
/// assert!(validate_price_cents("unit_price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the rental period.
///
/// ## Rules
/// - At least one month
/// - At most `MAX_RENTAL_PERIOD_MONTHS`
pub fn validate_rental_period_months(months: u32) -> ValidationResult<()> {
    if months == 0 || months > MAX_RENTAL_PERIOD_MONTHS {
        return Err(ValidationError::OutOfRange {
            field: "rental_period_months".to_string(),
            min: 1,
            max: i64::from(MAX_RENTAL_PERIOD_MONTHS),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
