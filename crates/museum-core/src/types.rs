//! # Domain Types
//!
//! Core domain types shared by the calculator, the storage layer and the
//! storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  OrderSummary   │   │      Rate       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (opaque)    │   │  item_total     │   │  bps (u32)      │       │
//! │  │  name, image    │   │  discount_*     │   │  1020 = 10.20%  │       │
//! │  │  unit_price     │   │  shipping, tax  │   └─────────────────┘       │
//! │  │  quantity       │   │  invoice_total  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DiscountKind   │   │ DiscountChoice  │                             │
//! │  │  None           │   │  Member         │  ← caller's answer when     │
//! │  │  Member         │   │  Volume         │    both discounts apply     │
//! │  │  Volume         │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{parse_scaled, Money};

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate in basis points (1 bps = 0.01%).
///
/// Used for the tax rate, the membership rate and every volume tier.
/// 1020 bps = 10.20%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Parses a percentage string exactly: `"10.2"` → 1020 bps.
    ///
    /// Negative values and unparsable text yield `None`.
    ///
    /// ```rust
    /// use museum_core::types::Rate;
    ///
    /// assert_eq!(Rate::parse_percentage("10.2"), Some(Rate::from_bps(1020)));
    /// assert_eq!(Rate::parse_percentage("15"), Some(Rate::from_bps(1500)));
    /// assert_eq!(Rate::parse_percentage("-1"), None);
    /// ```
    pub fn parse_percentage(text: &str) -> Option<Self> {
        let bps = parse_scaled(text.trim().trim_end_matches('%'), 2)?;
        u32::try_from(bps).ok().map(Rate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in a cart.
///
/// `name` and `image` are display-only; the calculator reads `unit_price`
/// and `quantity` alone. A line item may hold a zero or negative price or
/// quantity when it comes from a stale store; such lines are never billed
/// (see [`LineItem::is_billable`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Opaque product identifier, unique within a cart.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Price of one unit.
    pub unit_price: Money,

    /// Number of units.
    pub quantity: i64,

    /// Image URL, empty when the product has none.
    #[serde(default)]
    pub image: String,
}

impl LineItem {
    /// Creates a line item without an image.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image: String::new(),
        }
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Whether this line counts toward the order total.
    #[inline]
    pub fn is_billable(&self) -> bool {
        self.unit_price.is_positive() && self.quantity > 0
    }

    /// Unit price × quantity, `None` on overflow.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// Which discount source was applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// No discount applied.
    #[default]
    None,
    /// The flat membership rate.
    Member,
    /// The volume tier rate for the item total.
    Volume,
}

/// The caller's resolution when member and volume discounts are both eligible.
///
/// Stored as `"member"` / `"volume"` in session storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountChoice {
    Member,
    Volume,
}

impl DiscountChoice {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountChoice::Member => "member",
            DiscountChoice::Volume => "volume",
        }
    }

    /// The discount kind this choice produces.
    pub const fn kind(&self) -> DiscountKind {
        match self {
            DiscountChoice::Member => DiscountKind::Member,
            DiscountChoice::Volume => DiscountKind::Volume,
        }
    }
}

impl fmt::Display for DiscountChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "member" => Ok(DiscountChoice::Member),
            "volume" => Ok(DiscountChoice::Volume),
            _ => Err(ValidationError::NotAllowed {
                field: "discount choice".to_string(),
                allowed: vec!["member".to_string(), "volume".to_string()],
            }),
        }
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Itemized totals for one cart, fully derived from the calculator inputs.
///
/// ## Identities
/// ```text
/// taxable_amount = item_total - discount_amount + shipping
/// invoice_total  = taxable_amount + tax_amount
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Sum of unit price × quantity over billable lines.
    pub item_total: Money,

    /// Rate of the applied discount, zero when none.
    pub discount_rate: Rate,

    /// Discount deducted from the item total, carried as a positive amount.
    pub discount_amount: Money,

    /// Source of the discount.
    pub discount_kind: DiscountKind,

    /// True when member and volume discounts were both eligible.
    pub discount_contested: bool,

    /// Flat shipping fee, zero for an empty order.
    pub shipping: Money,

    /// Amount subject to tax.
    pub taxable_amount: Money,

    pub tax_rate: Rate,

    pub tax_amount: Money,

    /// Grand total.
    pub invoice_total: Money,

    /// Number of billable lines.
    pub line_count: usize,

    /// Number of lines excluded for a non-positive price or quantity.
    pub dropped_lines: usize,
}

impl OrderSummary {
    /// Whether no line was billed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(1020);
        assert_eq!(rate.bps(), 1020);
        assert!((rate.percentage() - 10.2).abs() < 0.001);
    }

    #[test]
    fn test_rate_parse_percentage() {
        assert_eq!(Rate::parse_percentage("10.20"), Some(Rate::from_bps(1020)));
        assert_eq!(Rate::parse_percentage("10.2%"), Some(Rate::from_bps(1020)));
        assert_eq!(Rate::parse_percentage("0"), Some(Rate::zero()));
        assert_eq!(Rate::parse_percentage("ten"), None);
    }

    #[test]
    fn test_line_item_billable() {
        assert!(LineItem::new("a", "A", Money::from_cents(100), 1).is_billable());
        assert!(!LineItem::new("a", "A", Money::zero(), 3).is_billable());
        assert!(!LineItem::new("a", "A", Money::from_cents(-100), 1).is_billable());
        assert!(!LineItem::new("a", "A", Money::from_cents(100), 0).is_billable());
        assert!(!LineItem::new("a", "A", Money::from_cents(100), -2).is_billable());
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new("a", "A", Money::from_cents(1250), 4);
        assert_eq!(item.line_total(), Some(Money::from_cents(5000)));
    }

    #[test]
    fn test_discount_choice_round_trips_through_str() {
        for choice in [DiscountChoice::Member, DiscountChoice::Volume] {
            assert_eq!(choice.as_str().parse::<DiscountChoice>().ok(), Some(choice));
        }
        assert_eq!("  Member ".parse::<DiscountChoice>().ok(), Some(DiscountChoice::Member));
        assert!("both".parse::<DiscountChoice>().is_err());
    }

    #[test]
    fn test_discount_kind_default() {
        assert_eq!(DiscountKind::default(), DiscountKind::None);
        assert_eq!(DiscountChoice::Volume.kind(), DiscountKind::Volume);
    }

    #[test]
    fn test_discount_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DiscountKind::Member).unwrap();
        assert_eq!(json, "\"member\"");
    }
}
