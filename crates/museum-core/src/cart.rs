//! # Cart Module
//!
//! The shopping cart and its persisted blob format.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Method            Change                 │
//! │  ──────────────           ───────────            ──────                 │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ──────────► qty += n or push      │
//! │  Change quantity ───────► set_quantity() ──────► qty = n (0 removes)   │
//! │  Remove ────────────────► remove() ────────────► line removed          │
//! │  Clear cart ────────────► clear() ─────────────► empty                 │
//! │  Header badge ──────────► count() ─────────────► Σ qty                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Blob Format
//! The cart is stored as the JSON array the browser storefront writes:
//! ```json
//! [{"id":"arch-001","name":"Column Bookends","unitPrice":42.5,"qty":2,"image":""}]
//! ```
//! Reading is lenient: numbers may be JSON numbers or numeric strings, and
//! entries that cannot be interpreted are skipped rather than failing the
//! whole cart. Entries with a zero or negative price or quantity are kept;
//! the calculator leaves them out of the totals.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CartDecodeError, CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::validation::{validate_cart_size, validate_item_id, validate_quantity};
use crate::MAX_ITEM_QUANTITY;

/// An ordered list of line items, unique by id.
///
/// ## Invariants (for lines added through this API)
/// - Ids are unique: adding an existing id increases its quantity
/// - At most `MAX_CART_ITEMS` distinct lines
/// - At most `MAX_ITEM_QUANTITY` per line
///
/// Lines decoded from storage are taken as-is and may break the quantity
/// and price rules; the calculator sanitizes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// A decoded cart and the number of entries that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCart {
    pub cart: Cart,
    pub skipped: usize,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from already-known lines.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Cart { items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Adds a line, or increases the quantity of the line with the same id.
    ///
    /// The quantity added is at least 1, matching the storefront's
    /// "Add to cart" button.
    pub fn add_item(&mut self, item: LineItem) -> CoreResult<()> {
        validate_item_id(&item.id)?;
        let quantity = item.quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_qty = existing.quantity.max(0).saturating_add(quantity);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: crate::MAX_CART_ITEMS,
        })?;
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.items.push(LineItem { quantity, ..item });
        Ok(())
    }

    /// Sets the quantity of a line. Zero removes it.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove(id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotInCart(id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Removes a line by id.
    pub fn remove(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across lines (the header badge). Non-positive
    /// quantities count as zero; a stored blob with absurd quantities
    /// saturates at `i64::MAX`.
    pub fn count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, i| total.saturating_add(i.quantity.max(0)))
    }

    /// Quantity of one product (the per-card badge), zero when absent.
    pub fn quantity_of(&self, id: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.id == id)
            .map_or(0, |i| i.quantity.max(0))
    }

    // =========================================================================
    // Blob encoding
    // =========================================================================

    /// Decodes the persisted blob, skipping entries that cannot be read.
    ///
    /// ```rust
    /// use museum_core::cart::Cart;
    ///
    /// let blob = r#"[{"id":"a","unitPrice":"12.50","qty":2},{"id":"b","unitPrice":"oops","qty":1}]"#;
    /// let decoded = Cart::from_json_lenient(blob).unwrap();
    /// assert_eq!(decoded.cart.len(), 1);
    /// assert_eq!(decoded.skipped, 1);
    /// ```
    pub fn from_json_lenient(blob: &str) -> Result<DecodedCart, CartDecodeError> {
        let value: Value = serde_json::from_str(blob)?;
        let entries = match value {
            Value::Array(entries) => entries,
            _ => return Err(CartDecodeError::NotAnArray),
        };

        let mut decoded = DecodedCart::default();
        for entry in &entries {
            match decode_entry(entry) {
                Some(item) => decoded.cart.items.push(item),
                None => decoded.skipped += 1,
            }
        }
        Ok(decoded)
    }

    /// Encodes the cart in the storefront's blob format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let stored: Vec<StoredItem<'_>> = self.items.iter().map(StoredItem::from).collect();
        serde_json::to_string(&stored)
    }
}

/// The storefront's per-entry shape (prices in dollars).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem<'a> {
    id: &'a str,
    name: &'a str,
    unit_price: f64,
    qty: i64,
    image: &'a str,
}

impl<'a> From<&'a LineItem> for StoredItem<'a> {
    fn from(item: &'a LineItem) -> Self {
        StoredItem {
            id: &item.id,
            name: &item.name,
            unit_price: item.unit_price.to_major_f64(),
            qty: item.quantity,
            image: &item.image,
        }
    }
}

/// Interprets one blob entry, `None` when it cannot be read.
fn decode_entry(entry: &Value) -> Option<LineItem> {
    let object = entry.as_object()?;

    let id = match object.get("id")? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if id.is_empty() {
        return None;
    }

    let unit_price = match object.get("unitPrice")? {
        Value::Number(n) => Money::parse_decimal(&n.to_string())?,
        Value::String(s) => Money::parse_decimal(s)?,
        _ => return None,
    };

    let quantity = match object.get("qty")? {
        Value::Number(n) => match n.as_i64() {
            Some(q) => q,
            None => whole_number(n.as_f64()?)?,
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };

    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(LineItem {
        id,
        name: text("name"),
        unit_price,
        quantity,
        image: text("image"),
    })
}

/// `2.0` → 2; fractional or out-of-range floats → `None`.
fn whole_number(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_CART_ITEMS;

    fn line(id: &str, cents: i64, qty: i64) -> LineItem {
        LineItem::new(id, format!("Souvenir {}", id), Money::from_cents(cents), qty)
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 999, 2)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 999, 2)).unwrap();
        cart.add_item(line("a", 999, 3)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("a"), 5);
    }

    #[test]
    fn test_add_item_adds_at_least_one() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 999, 0)).unwrap();
        cart.add_item(line("a", 999, -7)).unwrap();

        assert_eq!(cart.quantity_of("a"), 2);
    }

    #[test]
    fn test_add_item_rejects_blank_id() {
        let mut cart = Cart::new();
        let err = cart.add_item(line(" ", 999, 1)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_add_item_quantity_limit() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 100, MAX_ITEM_QUANTITY)).unwrap();

        let err = cart.add_item(line("a", 100, 1)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { requested: 1000, .. }));
        assert_eq!(cart.quantity_of("a"), MAX_ITEM_QUANTITY);

        let err = cart.add_item(line("b", 100, 5000)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_add_item_cart_size_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(line(&format!("p{}", i), 100, 1)).unwrap();
        }

        let err = cart.add_item(line("one-too-many", 100, 1)).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));

        // existing lines can still grow
        cart.add_item(line("p0", 100, 1)).unwrap();
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 999, 2)).unwrap();

        cart.set_quantity("a", 7).unwrap();
        assert_eq!(cart.quantity_of("a"), 7);

        assert!(cart.set_quantity("a", -1).is_err());
        assert!(cart.set_quantity("a", 1000).is_err());
        assert!(matches!(
            cart.set_quantity("missing", 1),
            Err(CoreError::ItemNotInCart(_))
        ));

        cart.set_quantity("a", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 999, 1)).unwrap();
        cart.add_item(line("b", 500, 1)).unwrap();

        cart.remove("a").unwrap();
        assert_eq!(cart.len(), 1);
        assert!(matches!(cart.remove("a"), Err(CoreError::ItemNotInCart(_))));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(line("a", 999, 2)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_count_ignores_negative_quantities() {
        let cart = Cart::from_items(vec![line("a", 100, 3), line("b", 100, -2)]);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.quantity_of("b"), 0);
    }

    #[test]
    fn test_decode_storefront_blob() {
        let blob = r#"[
            {"id":"arch-001","name":"Column Bookends","unitPrice":42.5,"qty":2,"image":"img/bookends.jpg"},
            {"id":"hist-002","name":"Postcard Set","unitPrice":"12.00","qty":"3"}
        ]"#;
        let decoded = Cart::from_json_lenient(blob).unwrap();

        assert_eq!(decoded.skipped, 0);
        let items = decoded.cart.items();
        assert_eq!(items[0].unit_price, Money::from_cents(4250));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].image, "img/bookends.jpg");
        assert_eq!(items[1].unit_price, Money::from_cents(1200));
        assert_eq!(items[1].quantity, 3);
        assert_eq!(items[1].image, "");
    }

    #[test]
    fn test_decode_skips_unreadable_entries() {
        let blob = r#"[
            null,
            "not an object",
            {"name":"no id","unitPrice":1,"qty":1},
            {"id":"","unitPrice":1,"qty":1},
            {"id":"a","unitPrice":"NaN","qty":1},
            {"id":"b","unitPrice":5,"qty":1.5},
            {"id":"c","qty":1},
            {"id":"d","unitPrice":5},
            {"id":42,"unitPrice":5,"qty":2.0}
        ]"#;
        let decoded = Cart::from_json_lenient(blob).unwrap();

        assert_eq!(decoded.skipped, 8);
        assert_eq!(decoded.cart.len(), 1);
        assert_eq!(decoded.cart.items()[0].id, "42");
        assert_eq!(decoded.cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_decode_extreme_values_stay_countable() {
        let blob = r#"[
            {"id":"a","unitPrice":"92233720368547758.07","qty":"9223372036854775807"},
            {"id":"b","unitPrice":1,"qty":"9223372036854775807"},
            {"id":"c","unitPrice":1,"qty":-5}
        ]"#;
        let decoded = Cart::from_json_lenient(blob).unwrap();

        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.cart.items()[0].unit_price, Money::from_cents(i64::MAX));
        assert_eq!(decoded.cart.count(), i64::MAX);
        assert_eq!(decoded.cart.quantity_of("c"), 0);
        assert_eq!(decoded.cart.items()[0].line_total(), None);
    }

    #[test]
    fn test_decode_keeps_stale_zero_price_entries() {
        let blob = r#"[{"id":"free","unitPrice":0,"qty":3}]"#;
        let decoded = Cart::from_json_lenient(blob).unwrap();

        assert_eq!(decoded.skipped, 0);
        assert!(!decoded.cart.items()[0].is_billable());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(matches!(
            Cart::from_json_lenient("{not json"),
            Err(CartDecodeError::Json(_))
        ));
        assert!(matches!(
            Cart::from_json_lenient(r#"{"id":"a"}"#),
            Err(CartDecodeError::NotAnArray)
        ));
    }

    #[test]
    fn test_encoded_blob_uses_storefront_shape() {
        let cart = Cart::from_items(vec![line("a", 1250, 2).with_image("a.jpg")]);
        let json = cart.to_json().unwrap();

        assert_eq!(
            json,
            r#"[{"id":"a","name":"Souvenir a","unitPrice":12.5,"qty":2,"image":"a.jpg"}]"#
        );

        let decoded = Cart::from_json_lenient(&json).unwrap();
        assert_eq!(decoded.cart, cart);
    }
}
