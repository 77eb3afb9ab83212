//! # Cart Repository
//!
//! The persisted cart, stored as the storefront's JSON blob under
//! `local/museumCartV1`.
//!
//! ## Forgiving Reads
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read()                                                                 │
//! │    key missing ─────────────────────────► empty cart                   │
//! │    blob ok ─────────────────────────────► cart                         │
//! │    blob ok, some entries unreadable ────► cart (warn, entries dropped) │
//! │    blob not a JSON array ───────────────► empty cart (warn, key reset) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is read → change → write of the whole blob.

use museum_core::cart::Cart;
use museum_core::error::CoreResult;
use museum_core::types::LineItem;
use tracing::{debug, warn};

use super::storage::{StorageArea, StorageRepository};
use crate::error::DbResult;
use crate::CART_STORAGE_KEY;

/// Repository for the shopper's cart.
#[derive(Debug, Clone)]
pub struct CartRepository {
    storage: StorageRepository,
}

impl CartRepository {
    pub fn new(storage: StorageRepository) -> Self {
        CartRepository { storage }
    }

    /// Reads the cart. A corrupt blob is removed and read as empty.
    pub async fn read(&self) -> DbResult<Cart> {
        let Some(blob) = self
            .storage
            .get_item(StorageArea::Local, CART_STORAGE_KEY)
            .await?
        else {
            return Ok(Cart::new());
        };

        match Cart::from_json_lenient(&blob) {
            Ok(decoded) => {
                if decoded.skipped > 0 {
                    warn!(
                        skipped = decoded.skipped,
                        kept = decoded.cart.len(),
                        "Dropped unreadable cart entries"
                    );
                }
                Ok(decoded.cart)
            }
            Err(e) => {
                warn!(error = %e, "Stored cart is corrupt, resetting it");
                self.storage
                    .remove_item(StorageArea::Local, CART_STORAGE_KEY)
                    .await?;
                Ok(Cart::new())
            }
        }
    }

    /// Replaces the stored cart.
    pub async fn write(&self, cart: &Cart) -> DbResult<()> {
        let blob = cart.to_json()?;
        self.storage
            .set_item(StorageArea::Local, CART_STORAGE_KEY, &blob)
            .await
    }

    /// Applies a mutation to the stored cart and writes it back.
    ///
    /// Nothing is written when the mutation fails.
    pub async fn update<F>(&self, mutate: F) -> DbResult<Cart>
    where
        F: FnOnce(&mut Cart) -> CoreResult<()>,
    {
        let mut cart = self.read().await?;
        mutate(&mut cart)?;
        self.write(&cart).await?;
        Ok(cart)
    }

    /// Adds a line, merging with an existing line of the same id.
    pub async fn add(&self, item: LineItem) -> DbResult<Cart> {
        debug!(id = %item.id, quantity = item.quantity, "Adding to cart");
        self.update(|cart| cart.add_item(item)).await
    }

    /// Sets a line's quantity; zero removes it.
    pub async fn set_quantity(&self, id: &str, quantity: i64) -> DbResult<Cart> {
        debug!(id = %id, quantity, "Setting cart quantity");
        self.update(|cart| cart.set_quantity(id, quantity)).await
    }

    pub async fn remove(&self, id: &str) -> DbResult<Cart> {
        debug!(id = %id, "Removing from cart");
        self.update(|cart| cart.remove(id)).await
    }

    /// Removes the stored cart entirely.
    pub async fn clear(&self) -> DbResult<()> {
        debug!("Clearing cart");
        self.storage
            .remove_item(StorageArea::Local, CART_STORAGE_KEY)
            .await?;
        Ok(())
    }

    /// Total quantity in the cart (the header badge).
    pub async fn count(&self) -> DbResult<i64> {
        Ok(self.read().await?.count())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use museum_core::error::CoreError;
    use museum_core::money::Money;
    use museum_core::pricing::{DiscountRequest, OrderCalculator};

    async fn setup() -> (StorageRepository, CartRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (db.storage(), db.carts())
    }

    fn line(id: &str, cents: i64, qty: i64) -> LineItem {
        LineItem::new(id, id.to_uppercase(), Money::from_cents(cents), qty)
    }

    #[tokio::test]
    async fn test_missing_cart_reads_empty() {
        let (_, carts) = setup().await;
        assert!(carts.read().await.unwrap().is_empty());
        assert_eq!(carts.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_persists() {
        let (_, carts) = setup().await;

        carts.add(line("a", 1250, 2)).await.unwrap();
        carts.add(line("a", 1250, 1)).await.unwrap();
        carts.add(line("b", 500, 1)).await.unwrap();

        let cart = carts.read().await.unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of("a"), 3);
        assert_eq!(carts.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_stored_blob_is_storefront_format() {
        let (storage, carts) = setup().await;

        carts.add(line("a", 1250, 2)).await.unwrap();

        let blob = storage
            .get_item(StorageArea::Local, CART_STORAGE_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            blob,
            r#"[{"id":"a","name":"A","unitPrice":12.5,"qty":2,"image":""}]"#
        );
    }

    #[tokio::test]
    async fn test_set_quantity_and_remove() {
        let (_, carts) = setup().await;
        carts.add(line("a", 1250, 1)).await.unwrap();
        carts.add(line("b", 500, 1)).await.unwrap();

        let cart = carts.set_quantity("a", 4).await.unwrap();
        assert_eq!(cart.quantity_of("a"), 4);

        let cart = carts.set_quantity("a", 0).await.unwrap();
        assert_eq!(cart.len(), 1);

        let cart = carts.remove("b").await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_nothing() {
        let (_, carts) = setup().await;
        carts.add(line("a", 1250, 1)).await.unwrap();

        let err = carts.remove("missing").await.unwrap_err();
        assert!(matches!(err, DbError::Cart(CoreError::ItemNotInCart(_))));
        assert_eq!(carts.read().await.unwrap().quantity_of("a"), 1);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_reset() {
        let (storage, carts) = setup().await;
        storage
            .set_item(StorageArea::Local, CART_STORAGE_KEY, "{not json")
            .await
            .unwrap();

        assert!(carts.read().await.unwrap().is_empty());
        assert_eq!(
            storage.get_item(StorageArea::Local, CART_STORAGE_KEY).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_browser_written_blob_is_read() {
        let (storage, carts) = setup().await;
        storage
            .set_item(
                StorageArea::Local,
                CART_STORAGE_KEY,
                r#"[{"id":"a","name":"A","unitPrice":"19.99","qty":"2"},{"id":"b","unitPrice":"x","qty":1}]"#,
            )
            .await
            .unwrap();

        let cart = carts.read().await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].unit_price, Money::from_cents(1999));
    }

    #[tokio::test]
    async fn test_extreme_stored_values_are_tolerated() {
        let (storage, carts) = setup().await;
        storage
            .set_item(
                StorageArea::Local,
                CART_STORAGE_KEY,
                r#"[{"id":"a","unitPrice":"92233720368547758.07","qty":1},
                    {"id":"b","unitPrice":"40","qty":"9223372036854775807"},
                    {"id":"c","unitPrice":"40","qty":"9223372036854775807"},
                    {"id":"d","unitPrice":"12.00","qty":2}]"#,
            )
            .await
            .unwrap();

        let cart = carts.read().await.unwrap();
        assert_eq!(cart.len(), 4);
        assert_eq!(carts.count().await.unwrap(), i64::MAX);

        let summary = OrderCalculator::museum_default()
            .calculate(cart.items(), &DiscountRequest::default())
            .into_summary()
            .unwrap();
        assert_eq!(summary.item_total, Money::from_cents(2400));
        assert_eq!(summary.dropped_lines, 3);
        assert_eq!(summary.invoice_total, Money::from_cents(5400));
    }

    #[tokio::test]
    async fn test_clear() {
        let (storage, carts) = setup().await;
        carts.add(line("a", 1250, 1)).await.unwrap();

        carts.clear().await.unwrap();
        assert!(carts.read().await.unwrap().is_empty());
        assert!(storage.keys(StorageArea::Local).await.unwrap().is_empty());
    }
}
