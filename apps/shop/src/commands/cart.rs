//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   add    ┌──────────┐   summary   ┌──────────────────┐   │
//! │  │  Empty   │────────►│ In Cart  │────────────►│  Priced order    │   │
//! │  │  Cart    │         │          │             │  (checkout.rs)   │   │
//! │  └──────────┘         └──────────┘             └──────────────────┘   │
//! │       ▲                    │ set / remove                               │
//! │       │                    ▼                                            │
//! │       └──────────────── clear (also forgets the discount choice)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use museum_core::cart::Cart;
use museum_core::catalog;
use museum_core::money::Money;
use museum_core::CoreError;
use museum_db::{Database, StorageArea};

use crate::error::AppError;

/// One cart line as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// `None` if price × quantity overflows.
    pub line_total: Option<Money>,
}

/// Cart contents plus the header badge count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub count: i64,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart
                .items()
                .iter()
                .map(|item| CartLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total(),
                })
                .collect(),
            count: cart.count(),
        }
    }
}

/// Gets the current cart contents.
pub async fn get_cart(db: &Database) -> Result<CartResponse, AppError> {
    debug!("get_cart command");
    let cart = db.carts().read().await?;
    Ok(CartResponse::from(&cart))
}

/// Adds a souvenir to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: added with the catalog price at this moment
pub async fn add_to_cart(db: &Database, id: &str, quantity: i64) -> Result<CartResponse, AppError> {
    debug!(id = %id, quantity, "add_to_cart command");

    let souvenir = catalog::find(id).ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;
    let cart = db.carts().add(souvenir.to_line_item(quantity)).await?;

    Ok(CartResponse::from(&cart))
}

/// Sets the quantity of a cart line; 0 removes it.
pub async fn update_cart_item(
    db: &Database,
    id: &str,
    quantity: i64,
) -> Result<CartResponse, AppError> {
    debug!(id = %id, quantity, "update_cart_item command");
    let cart = db.carts().set_quantity(id, quantity).await?;
    Ok(CartResponse::from(&cart))
}

/// Removes a line from the cart.
pub async fn remove_from_cart(db: &Database, id: &str) -> Result<CartResponse, AppError> {
    debug!(id = %id, "remove_from_cart command");
    let cart = db.carts().remove(id).await?;
    Ok(CartResponse::from(&cart))
}

/// Empties the cart and ends the shopping session, so the discount
/// choice is asked again next time.
pub async fn clear_cart(db: &Database) -> Result<CartResponse, AppError> {
    debug!("clear_cart command");
    db.carts().clear().await?;
    let removed = db.storage().clear_area(StorageArea::Session).await?;
    debug!(removed, "Session ended");
    Ok(CartResponse::from(&Cart::new()))
}
