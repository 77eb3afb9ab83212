//! # Discount Choice Prompt
//!
//! When a member's cart also qualifies for a volume discount the
//! calculator stops and asks. This module is where the question goes.
//!
//! ```text
//!   Both discounts are available. Use Member (15%, saves $22.50)?
//!   (no = Use Volume (10%, saves $15.00)) [Y/n]
//! ```
//!
//! Without a terminal there is nobody to ask, and the command fails with
//! `CHOICE_REQUIRED` so scripts pass `--use member|volume` instead.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use std::io::IsTerminal;
use tracing::debug;

use museum_core::format::ChoicePrompt;
use museum_core::types::DiscountChoice;

use crate::error::AppError;

/// Obtains the shopper's member/volume answer.
pub trait ChoiceResolver {
    /// `Ok(None)` means no answer is available.
    fn resolve(&mut self, prompt: &ChoicePrompt) -> Result<Option<DiscountChoice>, AppError>;
}

/// Asks on the terminal, or gives no answer when stdin is not a terminal.
#[derive(Debug, Default)]
pub struct TerminalResolver;

impl ChoiceResolver for TerminalResolver {
    fn resolve(&mut self, prompt: &ChoicePrompt) -> Result<Option<DiscountChoice>, AppError> {
        if !std::io::stdin().is_terminal() {
            debug!("No terminal, cannot ask for a discount choice");
            return Ok(None);
        }

        let accepted = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.question())
            .default(true)
            .interact()?;

        Ok(Some(prompt.choose(accepted)))
    }
}

/// Never answers. Used with `--json` so output stays machine-readable.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl ChoiceResolver for NoPrompt {
    fn resolve(&mut self, _prompt: &ChoicePrompt) -> Result<Option<DiscountChoice>, AppError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museum_core::money::Money;
    use museum_core::pricing::{DiscountRequest, OrderCalculator};
    use museum_core::types::LineItem;

    #[test]
    fn test_no_prompt_never_answers() {
        let items = vec![LineItem::new(
            "hist-003",
            "Pocket Watch Replica",
            Money::from_cents(15000),
            1,
        )];
        let outcome =
            OrderCalculator::museum_default().calculate(&items, &DiscountRequest::member());
        let conflict = outcome.conflict().expect("member and volume both apply");

        let prompt = ChoicePrompt::from(conflict);
        assert_eq!(NoPrompt.resolve(&prompt).unwrap(), None);
    }
}
