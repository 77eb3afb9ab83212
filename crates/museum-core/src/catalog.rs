//! # Catalog Module
//!
//! The gift shop's souvenir catalog, grouped by the museum's three
//! collections.
//!
//! The catalog is static data compiled into the binary. Prices live here
//! as integer cents; a cart line copies the price when the item is added.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;

/// A museum collection (one tab of the shop page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Architecture,
    Anthropology,
    History,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Architecture,
        Collection::Anthropology,
        Collection::History,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Collection::Architecture => "architecture",
            Collection::Anthropology => "anthropology",
            Collection::History => "history",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = ValidationError;

    /// Accepts the full name or the tab's short code (`arch`, `anth`, `hist`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "architecture" | "arch" => Ok(Collection::Architecture),
            "anthropology" | "anth" => Ok(Collection::Anthropology),
            "history" | "hist" => Ok(Collection::History),
            _ => Err(ValidationError::NotAllowed {
                field: "collection".to_string(),
                allowed: Collection::ALL.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

/// One product in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Souvenir {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Money,
    pub image: &'static str,
    pub collection: Collection,
}

impl Souvenir {
    /// A cart line for this souvenir.
    pub fn to_line_item(&self, quantity: i64) -> LineItem {
        LineItem::new(self.id, self.name, self.price, quantity).with_image(self.image)
    }
}

const fn souvenir(
    id: &'static str,
    name: &'static str,
    cents: i64,
    image: &'static str,
    collection: Collection,
) -> Souvenir {
    Souvenir {
        id,
        name,
        price: Money::from_cents(cents),
        image,
        collection,
    }
}

#[rustfmt::skip]
static SOUVENIRS: [Souvenir; 9] = [
    souvenir("arch-001", "Column Bookends", 4250, "images/arch/bookends.jpg", Collection::Architecture),
    souvenir("arch-002", "Cathedral Blueprint Print", 2800, "images/arch/blueprint.jpg", Collection::Architecture),
    souvenir("arch-003", "Arch Keystone Paperweight", 1650, "images/arch/keystone.jpg", Collection::Architecture),
    souvenir("anth-001", "Woven Basket Replica", 6400, "images/anth/basket.jpg", Collection::Anthropology),
    souvenir("anth-002", "Clay Figurine", 3500, "images/anth/figurine.jpg", Collection::Anthropology),
    souvenir("anth-003", "Trade Bead Necklace", 2299, "images/anth/beads.jpg", Collection::Anthropology),
    souvenir("hist-001", "Town Charter Facsimile", 1999, "images/hist/charter.jpg", Collection::History),
    souvenir("hist-002", "Postcard Set", 1200, "images/hist/postcards.jpg", Collection::History),
    souvenir("hist-003", "Pocket Watch Replica", 8900, "images/hist/watch.jpg", Collection::History),
];

/// Every souvenir in catalog order.
pub fn all() -> &'static [Souvenir] {
    &SOUVENIRS
}

/// Looks up a souvenir by id.
pub fn find(id: &str) -> Option<&'static Souvenir> {
    SOUVENIRS.iter().find(|s| s.id == id.trim())
}

/// Souvenirs of one collection, in catalog order.
pub fn by_collection(collection: Collection) -> impl Iterator<Item = &'static Souvenir> {
    SOUVENIRS.iter().filter(move |s| s.collection == collection)
}
