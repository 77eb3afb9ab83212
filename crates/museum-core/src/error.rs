//! # Error Types
//!
//! Domain-specific error types for museum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  museum-core errors (this file)                                        │
//! │  ├── CoreError        - Cart mutation failures                         │
//! │  ├── ValidationError  - Input / configuration validation failures      │
//! │  └── CartDecodeError  - Persisted cart blob is unreadable              │
//! │                                                                         │
//! │  museum-db errors (separate crate)                                     │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  shell errors (apps/shop)                                              │
//! │  └── AppError         - What the user sees (code + message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that "both discounts apply" is NOT an error: the calculator returns
//! it as [`crate::pricing::CalculationOutcome::ChoiceRequired`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Why a cart change was refused.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No souvenir with id {0}")]
    ProductNotFound(String),

    /// Cart has no line with this id.
    ///
    /// ## When This Occurs
    /// - Removing or re-quantifying an item that was already removed
    /// - Another shell process cleared the cart between read and write
    #[error("Item {0} is not in the cart")]
    ItemNotInCart(String),

    #[error("The cart already holds {max} different souvenirs")]
    CartTooLarge { max: usize },

    #[error("At most {max} of one souvenir fit in the cart, {requested} requested")]
    QuantityTooLarge { requested: i64, max: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A value handed to a constructor or cart operation is unusable.
///
/// `field` names the input as the shopper or config file spells it
/// (`quantity`, `tax_rate_bps`, `volume_tiers[1].min_cents`).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Required { field: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be from {min} to {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Malformed text, or a tier table out of order.
    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be one of {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Cart Decode Error
// =============================================================================

/// The persisted cart blob could not be read as a list of entries.
///
/// Individual bad entries never produce this error; they are skipped.
/// Only a blob that is not a JSON array at all does.
#[derive(Debug, Error)]
pub enum CartDecodeError {
    #[error("cart blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cart blob is not a JSON array")]
    NotAnArray,
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
    fn test_cart_limits_read_naturally() {
        let err = CoreError::QuantityTooLarge {
            requested: 1200,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "At most 999 of one souvenir fit in the cart, 1200 requested"
        );

        let err = CoreError::ItemNotInCart("arch-001".to_string());
        assert_eq!(err.to_string(), "Item arch-001 is not in the cart");
    }

    #[test]
    fn test_allowed_values_are_listed() {
        let err = ValidationError::NotAllowed {
            field: "conflict_policy".to_string(),
            allowed: vec!["ask".to_string(), "prefer_larger".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "conflict_policy must be one of ask, prefer_larger"
        );

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be from 1 to 999");
    }

    #[test]
    fn test_validation_is_transparent_in_core_error() {
        let core_err = CoreError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "quantity must be greater than zero");
    }
}
