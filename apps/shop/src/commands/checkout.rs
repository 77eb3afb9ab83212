//! # Checkout Commands
//!
//! Prices the stored cart.
//!
//! ## Choice Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. resolved = --use flag, else the stored session choice              │
//! │  2. calculate(cart, member flag, resolved)                             │
//! │       │                                                                 │
//! │       ├── Priced ──────────────────────────────────────────► summary   │
//! │       │                                                                 │
//! │       └── ChoiceRequired ──► resolver.resolve(prompt)                  │
//! │               ├── answer ──► store it, calculate again ────► summary   │
//! │               └── none ────► CHOICE_REQUIRED error                     │
//! │                                                                         │
//! │  3. Not contested any more? forget the stored choice                   │
//! │     Contested and --use given? remember it                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use museum_core::format::{ChoicePrompt, SummaryLines};
use museum_core::pricing::{CalculationOutcome, DiscountRequest, OrderCalculator};
use museum_core::types::{DiscountChoice, OrderSummary};
use museum_db::Database;

use crate::error::AppError;
use crate::prompt::ChoiceResolver;

/// Options of the `summary` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryRequest {
    pub member: bool,
    pub use_discount: Option<DiscountChoice>,
}

/// A priced cart: raw figures plus the display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub summary: OrderSummary,
    pub lines: SummaryLines,
}

impl From<OrderSummary> for CheckoutResponse {
    fn from(summary: OrderSummary) -> Self {
        let lines = SummaryLines::from(&summary);
        CheckoutResponse { summary, lines }
    }
}

/// Prices the stored cart, asking `resolver` if both discounts apply.
pub async fn summarize(
    db: &Database,
    calculator: &OrderCalculator,
    request: SummaryRequest,
    resolver: &mut dyn ChoiceResolver,
) -> Result<CheckoutResponse, AppError> {
    debug!(member = request.member, choice = ?request.use_discount, "summarize command");

    let cart = db.carts().read().await?;
    let choices = db.choices();

    let stored = choices.get().await?;
    let discount_request = DiscountRequest {
        is_member: request.member,
        resolved_choice: request.use_discount.or(stored),
    };

    let summary = match calculator.calculate(cart.items(), &discount_request) {
        CalculationOutcome::Priced(summary) => summary,
        CalculationOutcome::ChoiceRequired(conflict) => {
            let prompt = ChoicePrompt::from(&conflict);
            let choice = resolver.resolve(&prompt)?.ok_or_else(|| {
                AppError::choice_required(format!(
                    "{} Run again with --use member or --use volume.",
                    ChoicePrompt::HEADLINE
                ))
            })?;

            info!(choice = %choice, "Discount choice made");
            choices.set(choice).await?;

            calculator
                .calculate(cart.items(), &discount_request.with_choice(Some(choice)))
                .into_summary()
                .ok_or_else(|| AppError::internal("Discount choice was not applied"))?
        }
    };

    if !summary.discount_contested {
        if choices.clear().await? {
            debug!("Discount choice no longer needed, cleared");
        }
    } else if let Some(choice) = request.use_discount {
        choices.set(choice).await?;
    }

    Ok(CheckoutResponse::from(summary))
}

// =============================================================================
// Unit Tests
// =============================================================================
