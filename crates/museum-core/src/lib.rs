//! # museum-core: Pure Business Logic for the Museum Shop
//!
//! This crate is the **heart** of the museum gift-shop cart. It prices a
//! cart and resolves discounts as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Museum Shop Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    museum-shop (CLI shell)                      │   │
//! │  │    catalog ──► add / set / remove ──► summary ──► prompt       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ museum-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  pricing  │  │   cart    │  │  format   │  │   │
//! │  │   │   Money   │  │ Calculator│  │   Cart    │  │ receipts  │  │   │
//! │  │   │   Rate    │  │ Discounts │  │   blob    │  │  prompts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO PROMPTS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 museum-db (Storage Layer)                       │   │
//! │  │         cart blob + discount choice in SQLite areas             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (LineItem, OrderSummary, Rate, discounts)
//! - [`pricing`] - The order calculator and discount policy
//! - [`cart`] - Cart mutations and the persisted blob format
//! - [`format`] - Receipt lines and the discount prompt
//! - [`catalog`] - The souvenir catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Input and configuration rules
//!
//! ## Example Usage
//!
//! ```rust
//! use museum_core::money::Money;
//! use museum_core::pricing::{CalculationOutcome, DiscountRequest, OrderCalculator};
//! use museum_core::types::{DiscountChoice, LineItem};
//!
//! let calculator = OrderCalculator::museum_default();
//! let cart = vec![LineItem::new("arch-001", "Column Bookends", Money::from_cents(15000), 1)];
//!
//! // A member with a $150 cart qualifies for both discounts
//! let outcome = calculator.calculate(&cart, &DiscountRequest::member());
//! assert!(matches!(outcome, CalculationOutcome::ChoiceRequired(_)));
//!
//! // Once the shopper picks, the order is priced
//! let request = DiscountRequest::member().with_choice(Some(DiscountChoice::Member));
//! let summary = calculator.calculate(&cart, &request).into_summary().unwrap();
//! assert_eq!(summary.invoice_total, Money::from_cents(16806)); // $168.06
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use museum_core::Money` instead of
// `use museum_core::money::Money`

pub use cart::{Cart, DecodedCart};
pub use error::{CartDecodeError, CoreError, ValidationError};
pub use money::Money;
pub use pricing::{
    CalculationOutcome, ConflictPolicy, DiscountConflict, DiscountPolicy, DiscountRequest,
    OrderCalculator, VolumeSchedule, VolumeTier,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Sales tax rate in basis points (10.20%).
pub const TAX_RATE_BPS: u32 = 1020;

/// Membership discount rate in basis points (15%).
pub const MEMBER_RATE_BPS: u32 = 1500;

/// Upper bound for any configured discount rate.
pub const MAX_DISCOUNT_RATE_BPS: u32 = 1500;

/// Flat shipping fee in cents ($25.00), charged once per non-empty order.
pub const SHIPPING_FLAT_CENTS: i64 = 2500;

/// Largest item total (and shipping fee) an order can carry, in cents
/// ($10 trillion). Lines that would push the total past it are dropped, so
/// taxable, tax and invoice stay far inside `i64`.
pub const MAX_ORDER_CENTS: i64 = 1_000_000_000_000_000;
