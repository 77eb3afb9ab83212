//! # Pricing Module
//!
//! The order calculator: cart lines + discount request → itemized totals.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    OrderCalculator::calculate                           │
//! │                                                                         │
//! │  1. Sanitize ─────── drop lines with price <= 0 or qty <= 0            │
//! │        │                                                                │
//! │  2. Item total ───── Σ unit_price × quantity (integer cents)           │
//! │        │                                                                │
//! │  3. Volume rate ──── highest tier with min <= item total               │
//! │        │                                                                │
//! │  4. Discount ─────── member XOR volume                                 │
//! │        │             both eligible + no choice → ChoiceRequired        │
//! │        │                                                                │
//! │  5. Shipping ─────── flat fee iff at least one billable line           │
//! │        │                                                                │
//! │  6. Taxable ──────── item total - discount + shipping                  │
//! │        │                                                                │
//! │  7. Tax ──────────── taxable × tax rate (one rounding)                 │
//! │        │                                                                │
//! │  8. Invoice ──────── taxable + tax                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every figure is integer cents. The discount and the tax are each rounded
//! once by [`Money::apply_rate`]; taxable and invoice are exact sums of
//! figures already on the receipt, so the receipt always adds up.
//!
//! ## Example
//! ```rust
//! use museum_core::money::Money;
//! use museum_core::pricing::{DiscountRequest, OrderCalculator};
//! use museum_core::types::LineItem;
//!
//! let calculator = OrderCalculator::museum_default();
//! let cart = vec![LineItem::new("hist-002", "Postcard Set", Money::from_cents(4000), 1)];
//!
//! let summary = calculator
//!     .calculate(&cart, &DiscountRequest::default())
//!     .into_summary()
//!     .unwrap();
//!
//! assert_eq!(summary.invoice_total, Money::from_cents(7163)); // $71.63
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DiscountChoice, DiscountKind, LineItem, OrderSummary, Rate};
use crate::validation::{
    validate_rate_bps, validate_shipping, validate_volume_tiers, ValidationResult,
};
use crate::{
    MAX_DISCOUNT_RATE_BPS, MAX_ORDER_CENTS, MEMBER_RATE_BPS, SHIPPING_FLAT_CENTS, TAX_RATE_BPS,
};

// =============================================================================
// Volume Tiers
// =============================================================================

/// One step of the volume discount table.
///
/// The tier covers item totals from `min` (inclusive) up to the next tier's
/// `min` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VolumeTier {
    pub min: Money,
    pub rate: Rate,
}

impl VolumeTier {
    pub const fn new(min: Money, rate: Rate) -> Self {
        VolumeTier { min, rate }
    }
}

/// A validated, ascending volume discount table.
///
/// ## Default Table
/// ```text
///   item total        rate
///   $0.00  – $49.99    0%
///   $50.00 – $99.99    5%
///   $100.00 – $199.99 10%
///   $200.00 and up    15%
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSchedule {
    tiers: Vec<VolumeTier>,
}

impl VolumeSchedule {
    /// Builds a schedule, rejecting unordered bounds or rates above the
    /// maximum discount rate.
    pub fn new(tiers: Vec<VolumeTier>) -> ValidationResult<Self> {
        validate_volume_tiers(&tiers, MAX_DISCOUNT_RATE_BPS)?;
        Ok(VolumeSchedule { tiers })
    }

    /// The museum shop's standard table.
    pub fn museum_default() -> Self {
        VolumeSchedule {
            tiers: vec![
                VolumeTier::new(Money::from_cents(0), Rate::from_bps(0)),
                VolumeTier::new(Money::from_cents(5_000), Rate::from_bps(500)),
                VolumeTier::new(Money::from_cents(10_000), Rate::from_bps(1_000)),
                VolumeTier::new(Money::from_cents(20_000), Rate::from_bps(1_500)),
            ],
        }
    }

    /// A schedule that never grants a volume discount.
    pub fn none() -> Self {
        VolumeSchedule { tiers: Vec::new() }
    }

    pub fn tiers(&self) -> &[VolumeTier] {
        &self.tiers
    }

    /// Rate of the highest tier whose lower bound is `<= item_total`.
    ///
    /// A zero (or negative) item total always yields zero, whatever the
    /// first tier says.
    pub fn rate_for(&self, item_total: Money) -> Rate {
        if !item_total.is_positive() {
            return Rate::zero();
        }

        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.min <= item_total)
            .map(|tier| tier.rate)
            .unwrap_or_default()
    }
}

impl Default for VolumeSchedule {
    fn default() -> Self {
        VolumeSchedule::museum_default()
    }
}

// =============================================================================
// Discount Policy
// =============================================================================

/// How to settle member vs volume when the caller has not chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Return [`CalculationOutcome::ChoiceRequired`] and let the caller ask.
    #[default]
    Ask,
    /// Apply whichever discount is larger; member wins a tie.
    PreferLarger,
    /// Always apply the member discount.
    PreferMember,
}

/// Discount configuration: member rate, volume table, conflict policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountPolicy {
    pub member_rate: Rate,
    pub volume: VolumeSchedule,
    pub conflict: ConflictPolicy,
}

impl DiscountPolicy {
    /// Builds a policy, validating the member rate against the maximum
    /// discount rate.
    pub fn new(
        member_rate: Rate,
        volume: VolumeSchedule,
        conflict: ConflictPolicy,
    ) -> ValidationResult<Self> {
        validate_rate_bps("member_rate", member_rate, MAX_DISCOUNT_RATE_BPS)?;
        Ok(DiscountPolicy {
            member_rate,
            volume,
            conflict,
        })
    }

    pub fn museum_default() -> Self {
        DiscountPolicy {
            member_rate: Rate::from_bps(MEMBER_RATE_BPS),
            volume: VolumeSchedule::museum_default(),
            conflict: ConflictPolicy::Ask,
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy::museum_default()
    }
}

/// Per-calculation discount input from the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscountRequest {
    /// The membership box is checked.
    pub is_member: bool,

    /// The shopper's answer from an earlier `ChoiceRequired`. Ignored when
    /// only one discount is eligible.
    pub resolved_choice: Option<DiscountChoice>,
}

impl DiscountRequest {
    pub fn member() -> Self {
        DiscountRequest {
            is_member: true,
            resolved_choice: None,
        }
    }

    pub fn with_choice(mut self, choice: Option<DiscountChoice>) -> Self {
        self.resolved_choice = choice;
        self
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// One candidate discount offered to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCandidate {
    pub choice: DiscountChoice,
    pub rate: Rate,
    pub amount: Money,
}

/// Member and volume discounts are both eligible and nobody has chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountConflict {
    pub item_total: Money,
    pub member: DiscountCandidate,
    pub volume: DiscountCandidate,
}

impl DiscountConflict {
    /// The candidate for a given choice.
    pub fn candidate(&self, choice: DiscountChoice) -> DiscountCandidate {
        match choice {
            DiscountChoice::Member => self.member,
            DiscountChoice::Volume => self.volume,
        }
    }

    /// Settles the conflict under a deterministic policy, `None` for `Ask`.
    pub fn settle(&self, policy: ConflictPolicy) -> Option<DiscountChoice> {
        match policy {
            ConflictPolicy::Ask => None,
            ConflictPolicy::PreferMember => Some(DiscountChoice::Member),
            ConflictPolicy::PreferLarger => {
                if self.volume.amount > self.member.amount {
                    Some(DiscountChoice::Volume)
                } else {
                    Some(DiscountChoice::Member)
                }
            }
        }
    }
}

/// Result of one calculation: a priced order, or a question for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Priced(OrderSummary),
    ChoiceRequired(DiscountConflict),
}

impl CalculationOutcome {
    pub fn summary(&self) -> Option<&OrderSummary> {
        match self {
            CalculationOutcome::Priced(summary) => Some(summary),
            CalculationOutcome::ChoiceRequired(_) => None,
        }
    }

    pub fn into_summary(self) -> Option<OrderSummary> {
        match self {
            CalculationOutcome::Priced(summary) => Some(summary),
            CalculationOutcome::ChoiceRequired(_) => None,
        }
    }

    pub fn conflict(&self) -> Option<&DiscountConflict> {
        match self {
            CalculationOutcome::Priced(_) => None,
            CalculationOutcome::ChoiceRequired(conflict) => Some(conflict),
        }
    }
}

// =============================================================================
// Order Calculator
// =============================================================================

/// Pure order-total calculator.
///
/// Holds only configuration; every call reads the cart it is given and
/// nothing else, so repeated calls with the same input return the same
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCalculator {
    tax_rate: Rate,
    shipping_flat: Money,
    discounts: DiscountPolicy,
}

impl OrderCalculator {
    /// Builds a calculator, validating the tax rate (0–100%) and shipping fee.
    pub fn new(
        tax_rate: Rate,
        shipping_flat: Money,
        discounts: DiscountPolicy,
    ) -> ValidationResult<Self> {
        validate_rate_bps("tax_rate", tax_rate, 10_000)?;
        validate_shipping(shipping_flat)?;
        Ok(OrderCalculator {
            tax_rate,
            shipping_flat,
            discounts,
        })
    }

    /// 10.20% tax, $25.00 shipping, 15% members, the default volume table.
    pub fn museum_default() -> Self {
        OrderCalculator {
            tax_rate: Rate::from_bps(TAX_RATE_BPS),
            shipping_flat: Money::from_cents(SHIPPING_FLAT_CENTS),
            discounts: DiscountPolicy::museum_default(),
        }
    }

    pub fn tax_rate(&self) -> Rate {
        self.tax_rate
    }

    pub fn shipping_flat(&self) -> Money {
        self.shipping_flat
    }

    pub fn discounts(&self) -> &DiscountPolicy {
        &self.discounts
    }

    /// Computes the order summary for a cart.
    ///
    /// Lines with a non-positive price or quantity, and lines that would
    /// push the item total past [`MAX_ORDER_CENTS`](crate::MAX_ORDER_CENTS),
    /// are left out and counted in `dropped_lines`.
    pub fn calculate(&self, items: &[LineItem], request: &DiscountRequest) -> CalculationOutcome {
        // 1-2. Sanitize and total
        let mut item_total = Money::zero();
        let mut line_count = 0;
        let mut dropped_lines = 0;
        for item in items {
            let line_total = item
                .is_billable()
                .then(|| item.line_total())
                .flatten()
                .and_then(|line| item_total.checked_add(line))
                .filter(|total| total.cents() <= MAX_ORDER_CENTS);
            match line_total {
                Some(total) => {
                    item_total = total;
                    line_count += 1;
                }
                None => dropped_lines += 1,
            }
        }

        // 3. Volume rate
        let volume_rate = self.discounts.volume.rate_for(item_total);

        // 4. Discount resolution
        let member_eligible =
            request.is_member && !self.discounts.member_rate.is_zero() && item_total.is_positive();
        let volume_eligible = !volume_rate.is_zero();
        let contested = member_eligible && volume_eligible;

        let (discount_kind, discount_rate) = match (member_eligible, volume_eligible) {
            (false, false) => (DiscountKind::None, Rate::zero()),
            (true, false) => (DiscountKind::Member, self.discounts.member_rate),
            (false, true) => (DiscountKind::Volume, volume_rate),
            (true, true) => {
                let conflict = DiscountConflict {
                    item_total,
                    member: DiscountCandidate {
                        choice: DiscountChoice::Member,
                        rate: self.discounts.member_rate,
                        amount: item_total.apply_rate(self.discounts.member_rate),
                    },
                    volume: DiscountCandidate {
                        choice: DiscountChoice::Volume,
                        rate: volume_rate,
                        amount: item_total.apply_rate(volume_rate),
                    },
                };
                let choice = request
                    .resolved_choice
                    .or_else(|| conflict.settle(self.discounts.conflict));
                match choice {
                    Some(choice) => (choice.kind(), conflict.candidate(choice).rate),
                    None => return CalculationOutcome::ChoiceRequired(conflict),
                }
            }
        };
        let discount_amount = item_total.apply_rate(discount_rate);

        // 5. Shipping
        let shipping = if line_count > 0 {
            self.shipping_flat
        } else {
            Money::zero()
        };

        // 6-8. Taxable, tax, invoice
        let taxable_amount = item_total - discount_amount + shipping;
        let tax_amount = taxable_amount.apply_rate(self.tax_rate);
        let invoice_total = taxable_amount + tax_amount;

        CalculationOutcome::Priced(OrderSummary {
            item_total,
            discount_rate,
            discount_amount,
            discount_kind,
            discount_contested: contested,
            shipping,
            taxable_amount,
            tax_rate: self.tax_rate,
            tax_amount,
            invoice_total,
            line_count,
            dropped_lines,
        })
    }
}

impl Default for OrderCalculator {
    fn default() -> Self {
        OrderCalculator::museum_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
