//! # Choice Repository
//!
//! The shopper's answer to "both discounts are available", kept in the
//! session area under `museumCartChoice` so they are asked once per
//! session rather than on every recalculation.
//!
//! ## Lifetime
//! The answer is applied silently (also under `--json`) until one of:
//! - the conflict disappears (the checkout command clears it)
//! - the shopper clears the cart, which ends the whole session
//! - nothing was written to the session area for `DbConfig::session_idle`,
//!   checked each time the storage is opened

use museum_core::types::DiscountChoice;
use tracing::{debug, warn};

use super::storage::{StorageArea, StorageRepository};
use crate::error::DbResult;
use crate::CHOICE_STORAGE_KEY;

#[derive(Debug, Clone)]
pub struct ChoiceRepository {
    storage: StorageRepository,
}

impl ChoiceRepository {
    pub fn new(storage: StorageRepository) -> Self {
        ChoiceRepository { storage }
    }

    /// The stored choice. An unrecognised value is removed and reads as `None`.
    pub async fn get(&self) -> DbResult<Option<DiscountChoice>> {
        let Some(value) = self
            .storage
            .get_item(StorageArea::Session, CHOICE_STORAGE_KEY)
            .await?
        else {
            return Ok(None);
        };

        match value.parse::<DiscountChoice>() {
            Ok(choice) => Ok(Some(choice)),
            Err(_) => {
                warn!(value = %value, "Ignoring unrecognised discount choice");
                self.clear().await?;
                Ok(None)
            }
        }
    }

    pub async fn set(&self, choice: DiscountChoice) -> DbResult<()> {
        debug!(choice = %choice, "Remembering discount choice");
        self.storage
            .set_item(StorageArea::Session, CHOICE_STORAGE_KEY, choice.as_str())
            .await
    }

    /// Forgets the choice. Returns whether one was stored.
    pub async fn clear(&self) -> DbResult<bool> {
        self.storage
            .remove_item(StorageArea::Session, CHOICE_STORAGE_KEY)
            .await
    }
}
