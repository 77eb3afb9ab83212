//! # Format Module
//!
//! Turns calculator output into the strings the storefront shows.
//!
//! ## Cart Page Summary
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Item total              $150.00         │
//! │  Volume discount           $0.00         │
//! │  Member discount         ($22.50)        │  ← deductions in parentheses
//! │  Shipping                 $25.00         │
//! │  Subtotal (taxable)      $152.50         │
//! │  Tax rate                 10.20%         │
//! │  Tax                      $15.56         │
//! │  Invoice total           $168.06         │
//! │                                          │
//! │  Member discount applied. (Volume tiers suppressed.)                   │
//! └──────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

use crate::money::Money;
use crate::pricing::DiscountConflict;
use crate::types::{DiscountChoice, DiscountKind, OrderSummary, Rate};

// =============================================================================
// Scalar Formatting
// =============================================================================

/// Formats an amount as dollars, negatives in parentheses.
///
/// ```rust
/// use museum_core::format::format_money;
/// use museum_core::money::Money;
///
/// assert_eq!(format_money(Money::from_cents(1234)), "$12.34");
/// assert_eq!(format_money(Money::from_cents(-1234)), "($12.34)");
/// ```
pub fn format_money(amount: Money) -> String {
    let abs = amount.abs();
    let text = format!("${}.{:02}", abs.dollars(), abs.cents_part());
    if amount.is_negative() {
        format!("({})", text)
    } else {
        text
    }
}

/// Formats a deduction: parenthesised when non-zero, `$0.00` otherwise.
pub fn format_discount(amount: Money) -> String {
    if amount.is_zero() {
        format_money(Money::zero())
    } else {
        format!("({})", format_money(amount.abs()))
    }
}

/// Formats a rate as a percentage with 0 to 2 decimals, rounding half-up.
///
/// ```rust
/// use museum_core::format::format_rate;
/// use museum_core::types::Rate;
///
/// assert_eq!(format_rate(Rate::from_bps(1020), 2), "10.20%");
/// assert_eq!(format_rate(Rate::from_bps(1050), 0), "11%");
/// ```
pub fn format_rate(rate: Rate, decimals: u32) -> String {
    let decimals = decimals.min(2);
    let divisor = 10_u64.pow(2 - decimals);
    let scaled = (u64::from(rate.bps()) + divisor / 2) / divisor;

    if decimals == 0 {
        return format!("{}%", scaled);
    }

    let unit = 10_u64.pow(decimals);
    format!(
        "{}.{:0width$}%",
        scaled / unit,
        scaled % unit,
        width = decimals as usize
    )
}

// =============================================================================
// Summary Lines
// =============================================================================

/// Display strings for every row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLines {
    pub item_total: String,
    pub volume_discount: String,
    pub member_discount: String,
    pub shipping: String,
    pub taxable: String,
    pub tax_rate: String,
    pub tax: String,
    pub total: String,
    /// Which discount was applied; empty for an empty order.
    pub note: String,
}

impl From<&OrderSummary> for SummaryLines {
    fn from(summary: &OrderSummary) -> Self {
        let zero = format_money(Money::zero());
        let (volume_discount, member_discount) = match summary.discount_kind {
            DiscountKind::Volume => (format_discount(summary.discount_amount), zero),
            DiscountKind::Member => (zero, format_discount(summary.discount_amount)),
            DiscountKind::None => (zero.clone(), zero),
        };

        SummaryLines {
            item_total: format_money(summary.item_total),
            volume_discount,
            member_discount,
            shipping: format_money(summary.shipping),
            taxable: format_money(summary.taxable_amount),
            tax_rate: format_rate(summary.tax_rate, 2),
            tax: format_money(summary.tax_amount),
            total: format_money(summary.invoice_total),
            note: discount_note(summary),
        }
    }
}

fn discount_note(summary: &OrderSummary) -> String {
    if summary.item_total.is_zero() {
        return String::new();
    }

    match summary.discount_kind {
        DiscountKind::Member => "Member discount applied. (Volume tiers suppressed.)".to_string(),
        DiscountKind::Volume if !summary.discount_rate.is_zero() => format!(
            "Volume discount applied at {}.",
            format_rate(summary.discount_rate, 0)
        ),
        _ => "No discount applied.".to_string(),
    }
}

// =============================================================================
// Choice Prompt
// =============================================================================

/// The question put to the shopper when both discounts apply.
///
/// Accepting picks the member discount, declining picks volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub member_label: String,
    pub volume_label: String,
}

impl ChoicePrompt {
    pub const HEADLINE: &'static str = "Both discounts are available.";

    pub fn choose(&self, accepted: bool) -> DiscountChoice {
        if accepted {
            DiscountChoice::Member
        } else {
            DiscountChoice::Volume
        }
    }

    /// One-line form for a yes/no confirmation.
    pub fn question(&self) -> String {
        format!(
            "{} {}? (no = {})",
            Self::HEADLINE,
            self.member_label,
            self.volume_label
        )
    }
}

impl From<&DiscountConflict> for ChoicePrompt {
    fn from(conflict: &DiscountConflict) -> Self {
        ChoicePrompt {
            member_label: format!(
                "Use Member ({}, saves {})",
                format_rate(conflict.member.rate, 0),
                format_money(conflict.member.amount)
            ),
            volume_label: format!(
                "Use Volume ({}, saves {})",
                format_rate(conflict.volume.rate, 0),
                format_money(conflict.volume.amount)
            ),
        }
    }
}

impl fmt::Display for ChoicePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::HEADLINE)?;
        writeln!(f)?;
        writeln!(f, "  member = {}", self.member_label)?;
        write!(f, "  volume = {}", self.volume_label)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{CalculationOutcome, DiscountRequest, OrderCalculator};
    use crate::types::LineItem;

    fn cart_of(cents: i64) -> Vec<LineItem> {
        vec![LineItem::new("a", "A", Money::from_cents(cents), 1)]
    }

    fn priced(cents: i64, request: DiscountRequest) -> OrderSummary {
        OrderCalculator::museum_default()
            .calculate(&cart_of(cents), &request)
            .into_summary()
            .unwrap()
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Money::zero()), "$0.00");
        assert_eq!(format_money(Money::from_cents(5)), "$0.05");
        assert_eq!(format_money(Money::from_cents(16806)), "$168.06");
        assert_eq!(format_money(Money::from_cents(-550)), "($5.50)");
    }

    #[test]
    fn test_format_discount() {
        assert_eq!(format_discount(Money::zero()), "$0.00");
        assert_eq!(format_discount(Money::from_cents(2250)), "($22.50)");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Rate::from_bps(1020), 2), "10.20%");
        assert_eq!(format_rate(Rate::from_bps(1020), 1), "10.2%");
        assert_eq!(format_rate(Rate::from_bps(1020), 0), "10%");
        assert_eq!(format_rate(Rate::from_bps(500), 0), "5%");
        assert_eq!(format_rate(Rate::from_bps(5), 2), "0.05%");
        assert_eq!(format_rate(Rate::from_bps(1500), 9), "15.00%");
    }

    #[test]
    fn test_summary_lines_member() {
        let summary = priced(
            15000,
            DiscountRequest::member().with_choice(Some(DiscountChoice::Member)),
        );
        let lines = SummaryLines::from(&summary);

        assert_eq!(lines.item_total, "$150.00");
        assert_eq!(lines.volume_discount, "$0.00");
        assert_eq!(lines.member_discount, "($22.50)");
        assert_eq!(lines.shipping, "$25.00");
        assert_eq!(lines.taxable, "$152.50");
        assert_eq!(lines.tax_rate, "10.20%");
        assert_eq!(lines.tax, "$15.56");
        assert_eq!(lines.total, "$168.06");
        assert_eq!(lines.note, "Member discount applied. (Volume tiers suppressed.)");
    }

    #[test]
    fn test_summary_lines_volume() {
        let lines = SummaryLines::from(&priced(15000, DiscountRequest::default()));

        assert_eq!(lines.volume_discount, "($15.00)");
        assert_eq!(lines.member_discount, "$0.00");
        assert_eq!(lines.note, "Volume discount applied at 10%.");
    }

    #[test]
    fn test_summary_lines_no_discount() {
        let lines = SummaryLines::from(&priced(4000, DiscountRequest::default()));

        assert_eq!(lines.total, "$71.63");
        assert_eq!(lines.note, "No discount applied.");
    }

    #[test]
    fn test_summary_lines_empty_order() {
        let summary = OrderCalculator::museum_default()
            .calculate(&[], &DiscountRequest::member())
            .into_summary()
            .unwrap();
        let lines = SummaryLines::from(&summary);

        assert_eq!(lines.total, "$0.00");
        assert_eq!(lines.note, "");
    }

    #[test]
    fn test_choice_prompt() {
        let outcome = OrderCalculator::museum_default()
            .calculate(&cart_of(15000), &DiscountRequest::member());
        let conflict = match outcome {
            CalculationOutcome::ChoiceRequired(conflict) => conflict,
            other => panic!("expected a choice, got {:?}", other),
        };

        let prompt = ChoicePrompt::from(&conflict);
        assert_eq!(prompt.member_label, "Use Member (15%, saves $22.50)");
        assert_eq!(prompt.volume_label, "Use Volume (10%, saves $15.00)");
        assert!(prompt.question().starts_with("Both discounts are available."));
        assert!(prompt.to_string().contains("volume = Use Volume"));

        assert_eq!(prompt.choose(true), DiscountChoice::Member);
        assert_eq!(prompt.choose(false), DiscountChoice::Volume);
    }
}
