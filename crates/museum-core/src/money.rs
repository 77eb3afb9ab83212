//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A browser cart summing prices as floats:                              │
//! │    12.10 + 7.20 = 19.299999999999997  ❌                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1210 + 720 = 1930 cents, always                                     │
//! │                                                                         │
//! │  Rates (tax, discounts) are basis points, so a rate application is     │
//! │  one integer multiply and ONE rounding step.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use museum_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price * 2;             // $21.98
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.cents(), 1599);
//!
//! // Prices arriving as decimal text are parsed exactly
//! assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are carried as positive amounts, but the
///   display layer needs to render negatives in parenthesised form
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.unit_price ──► line total ──► OrderSummary.item_total        │
/// │                                              │                          │
/// │                       discount (rate) ◄──────┤                          │
/// │                                              ▼                          │
/// │                   taxable ──► tax (rate) ──► invoice_total              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use museum_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal dollar amount such as `"12.5"` or `"-3.10"`.
    ///
    /// Digits beyond the cent are rounded half-up on the first dropped digit,
    /// so `"19.995"` becomes 2000 cents. Exponent notation, empty strings and
    /// anything that does not fit in an `i64` of cents yield `None`.
    ///
    /// ```rust
    /// use museum_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("40"), Some(Money::from_cents(4000)));
    /// assert_eq!(Money::parse_decimal(".5"), Some(Money::from_cents(50)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(text: &str) -> Option<Self> {
        parse_scaled(text, 2).map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount in dollars as a float.
    ///
    /// Only for writing the browser-compatible cart blob, which stores
    /// prices as JSON numbers. `cents / 100` is the nearest double to the
    /// two-decimal value, so it prints back as that same value.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a rate and rounds the result to the nearest cent.
    ///
    /// ## Rounding
    /// Half away from zero: `(cents × bps ± 5000) / 10000`. This is the ONLY
    /// place a monetary figure is rounded, and every caller applies it once
    /// per displayed figure.
    ///
    /// ```rust
    /// use museum_core::money::Money;
    /// use museum_core::types::Rate;
    ///
    /// // $152.50 × 10.20% = $15.555 → $15.56
    /// let tax = Money::from_cents(15250).apply_rate(Rate::from_bps(1020));
    /// assert_eq!(tax.cents(), 1556);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 so large carts cannot overflow the intermediate product
        let product = self.0 as i128 * rate.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money(rounded as i64)
    }

    /// Multiplies by a quantity, `None` on overflow.
    ///
    /// ```rust
    /// use museum_core::money::Money;
    ///
    /// let line = Money::from_cents(299).checked_multiply_quantity(3);
    /// assert_eq!(line, Some(Money::from_cents(897)));
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// Parses a signed decimal string into an integer scaled by `10^scale`.
///
/// Shared by [`Money::parse_decimal`] (scale 2, cents) and
/// [`Rate::parse_percentage`] (scale 2, basis points).
pub(crate) fn parse_scaled(text: &str, scale: u32) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let factor = 10_i64.checked_pow(scale)?;
    let whole_value: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    let mut frac_digits = frac.bytes();
    let mut frac_value: i64 = 0;
    for _ in 0..scale {
        let digit = frac_digits.next().map_or(0, |b| i64::from(b - b'0'));
        frac_value = frac_value * 10 + digit;
    }
    if frac_digits.next().is_some_and(|b| b >= b'5') {
        frac_value += 1;
    }

    let value = whole_value.checked_mul(factor)?.checked_add(frac_value)?;
    Some(if negative { -value } else { value })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style display: `$10.99`, `-$5.50`.
///
/// The storefront uses [`crate::format::format_money`] instead, which
/// renders negatives in parentheses.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("12.5"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_decimal("12.50"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse_decimal(" 7 "), Some(Money::from_cents(700)));
        assert_eq!(Money::parse_decimal("0.1"), Some(Money::from_cents(10)));
        assert_eq!(Money::parse_decimal("-3.10"), Some(Money::from_cents(-310)));
        assert_eq!(Money::parse_decimal("12."), Some(Money::from_cents(1200)));
    }

    #[test]
    fn test_parse_decimal_rounds_sub_cent_half_up() {
        assert_eq!(Money::parse_decimal("19.994"), Some(Money::from_cents(1999)));
        assert_eq!(Money::parse_decimal("19.995"), Some(Money::from_cents(2000)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("-"), None);
        assert_eq!(Money::parse_decimal("NaN"), None);
        assert_eq!(Money::parse_decimal("Infinity"), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_apply_rate_exact() {
        // $65.00 at 10.20% = $6.63 exactly
        let tax = Money::from_cents(6500).apply_rate(Rate::from_bps(1020));
        assert_eq!(tax.cents(), 663);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // $152.50 at 10.20% = 1555.5 cents → 1556
        let tax = Money::from_cents(15250).apply_rate(Rate::from_bps(1020));
        assert_eq!(tax.cents(), 1556);

        // $50.01 at 5% = 250.05 cents → 250
        let discount = Money::from_cents(5001).apply_rate(Rate::from_bps(500));
        assert_eq!(discount.cents(), 250);
    }

    #[test]
    fn test_apply_rate_negative_rounds_away_from_zero() {
        let amount = Money::from_cents(-15250).apply_rate(Rate::from_bps(1020));
        assert_eq!(amount.cents(), -1556);
    }

    #[test]
    fn test_apply_rate_never_exceeds_base_at_full_rate() {
        let base = Money::from_cents(12345);
        assert_eq!(base.apply_rate(Rate::from_bps(10_000)), base);
    }

    #[test]
    fn test_checked_multiply_quantity() {
        assert_eq!(
            Money::from_cents(299).checked_multiply_quantity(3),
            Some(Money::from_cents(897))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    }

    #[test]
    fn test_to_major_f64_prints_two_decimals() {
        assert_eq!(Money::from_cents(1250).to_major_f64().to_string(), "12.5");
        assert_eq!(Money::from_cents(10).to_major_f64().to_string(), "0.1");
        assert_eq!(Money::from_cents(1999).to_major_f64().to_string(), "19.99");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
