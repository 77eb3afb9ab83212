//! # Catalog Commands

use serde::Serialize;
use tracing::debug;

use museum_core::catalog::{self, Collection, Souvenir};
use museum_core::format::format_money;

/// A souvenir as listed to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub price: String,
    pub collection: Collection,
}

impl From<&Souvenir> for CatalogEntry {
    fn from(souvenir: &Souvenir) -> Self {
        CatalogEntry {
            id: souvenir.id,
            name: souvenir.name,
            price: format_money(souvenir.price),
            collection: souvenir.collection,
        }
    }
}

/// Lists the catalog, optionally one collection only.
pub fn list_catalog(collection: Option<Collection>) -> Vec<CatalogEntry> {
    debug!(collection = ?collection, "list_catalog command");

    match collection {
        Some(c) => catalog::by_collection(c).map(CatalogEntry::from).collect(),
        None => catalog::all().iter().map(CatalogEntry::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_everything() {
        assert_eq!(list_catalog(None).len(), catalog::all().len());
    }

    #[test]
    fn test_list_one_collection() {
        let entries = list_catalog(Some(Collection::History));
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.collection == Collection::History));
        assert!(entries.iter().any(|e| e.id == "hist-002" && e.price == "$12.00"));
    }
}
