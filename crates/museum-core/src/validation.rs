//! # Validation Module
//!
//! Input and configuration validation.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Config load (shell)                                                    │
//! │  └── validate_rate_bps, validate_volume_tiers, validate_shipping       │
//! │           │  a bad pricing table never reaches the calculator          │
//! │           ▼                                                             │
//! │  Cart mutation (Cart::add_item / set_quantity)                         │
//! │  └── validate_item_id, validate_quantity, validate_cart_size           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Calculation                                                            │
//! │  └── no validation errors: stale lines are sanitized away              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::VolumeTier;
use crate::types::Rate;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product id.
const MAX_ID_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 64 characters
///
/// ```rust
/// use museum_core::validation::validate_item_id;
///
/// assert!(validate_item_id("arch-001").is_ok());
/// assert!(validate_item_id("  ").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity set by the shopper.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a flat shipping fee (zero is allowed, negative is not).
pub fn validate_shipping(fee: Money) -> ValidationResult<()> {
    if fee.is_negative() || fee.cents() > crate::MAX_ORDER_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "shipping".to_string(),
            min: 0,
            max: crate::MAX_ORDER_CENTS,
        });
    }

    Ok(())
}

/// Validates a rate against an upper bound in basis points.
///
/// ```rust
/// use museum_core::types::Rate;
/// use museum_core::validation::validate_rate_bps;
///
/// assert!(validate_rate_bps("tax_rate", Rate::from_bps(1020), 10_000).is_ok());
/// assert!(validate_rate_bps("member_rate", Rate::from_bps(2000), 1500).is_err());
/// ```
pub fn validate_rate_bps(field: &str, rate: Rate, max_bps: u32) -> ValidationResult<()> {
    if rate.bps() > max_bps {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(max_bps),
        });
    }

    Ok(())
}

/// Validates a volume discount table.
///
/// ## Rules
/// - Lower bounds are non-negative and strictly ascending
/// - Every rate is at most `max_rate_bps`
///
/// An empty table is valid: no volume discount ever applies.
pub fn validate_volume_tiers(tiers: &[VolumeTier], max_rate_bps: u32) -> ValidationResult<()> {
    for (index, tier) in tiers.iter().enumerate() {
        if tier.min.is_negative() {
            return Err(ValidationError::InvalidFormat {
                field: "volume_tiers".to_string(),
                reason: format!("tier {} has a negative lower bound", index),
            });
        }

        validate_rate_bps("volume_tiers.rate", tier.rate, max_rate_bps)?;

        if let Some(previous) = index.checked_sub(1).and_then(|i| tiers.get(i)) {
            if tier.min <= previous.min {
                return Err(ValidationError::InvalidFormat {
                    field: "volume_tiers".to_string(),
                    reason: format!(
                        "lower bounds must be strictly ascending ({} after {})",
                        tier.min, previous.min
                    ),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before adding a new distinct line.
///
/// ## Rules
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min_cents: i64, bps: u32) -> VolumeTier {
        VolumeTier::new(Money::from_cents(min_cents), Rate::from_bps(bps))
    }

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("arch-001").is_ok());
        assert!(validate_item_id("42").is_ok());
        assert!(validate_item_id("").is_err());
        assert!(validate_item_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_shipping() {
        assert!(validate_shipping(Money::zero()).is_ok());
        assert!(validate_shipping(Money::from_cents(2500)).is_ok());
        assert!(validate_shipping(Money::from_cents(-1)).is_err());
        assert!(validate_shipping(Money::from_cents(crate::MAX_ORDER_CENTS + 1)).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("tax_rate", Rate::from_bps(10_000), 10_000).is_ok());
        assert!(validate_rate_bps("tax_rate", Rate::from_bps(10_001), 10_000).is_err());
    }

    #[test]
    fn test_validate_volume_tiers() {
        let good = [tier(0, 0), tier(5000, 500), tier(10000, 1000), tier(20000, 1500)];
        assert!(validate_volume_tiers(&good, 1500).is_ok());
        assert!(validate_volume_tiers(&[], 1500).is_ok());

        let unordered = [tier(0, 0), tier(10000, 1000), tier(5000, 500)];
        assert!(validate_volume_tiers(&unordered, 1500).is_err());

        let duplicate = [tier(5000, 500), tier(5000, 1000)];
        assert!(validate_volume_tiers(&duplicate, 1500).is_err());

        let too_rich = [tier(0, 0), tier(5000, 2000)];
        assert!(validate_volume_tiers(&too_rich, 1500).is_err());

        let negative = [tier(-100, 0)];
        assert!(validate_volume_tiers(&negative, 1500).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }
}
