use super::money::Money;
use crate::error::{Result, VendingError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;

/// Identifier of a product slot, e.g. `cola`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product the machine sells, with its fixed price and starting stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub display_name: String,
    pub price: Money,
    pub stock: u32,
}

impl CatalogEntry {
    pub fn new(id: &str, display_name: &str, price: u64, stock: u32) -> Self {
        Self {
            id: ItemId::new(id),
            display_name: display_name.to_string(),
            price: Money::new(price),
            stock,
        }
    }
}

/// The price list of the machine.
///
/// Entries keep their configured order, which is also the order the view
/// reports stock in. Prices never change once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty lists, duplicate ids and zero prices.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(VendingError::InvalidCatalog(
                "catalog has no items".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.clone()) {
                return Err(VendingError::InvalidCatalog(format!(
                    "duplicate item id: {}",
                    entry.id
                )));
            }
            if entry.price.is_zero() {
                return Err(VendingError::InvalidCatalog(format!(
                    "price of {} must be positive",
                    entry.id
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The factory catalog: cola, water and coffee, five of each.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("cola", "Cola", 1100, 5),
                CatalogEntry::new("water", "Water", 600, 5),
                CatalogEntry::new("coffee", "Coffee", 700, 5),
            ],
        }
    }

    /// Loads a catalog from a JSON array of entries.
    pub fn from_json<R: Read>(source: R) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(source)?;
        Self::new(entries)
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.entries().len(), 3);

        let cola = catalog.get(&ItemId::from("cola")).unwrap();
        assert_eq!(cola.price, Money::new(1100));
        assert_eq!(cola.stock, 5);

        assert_eq!(
            catalog.get(&ItemId::from("water")).unwrap().price,
            Money::new(600)
        );
        assert_eq!(
            catalog.get(&ItemId::from("coffee")).unwrap().price,
            Money::new(700)
        );
        assert!(catalog.get(&ItemId::from("juice")).is_none());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {"id": "tea", "display_name": "Green Tea", "price": 900, "stock": 2},
            {"id": "soda", "display_name": "Soda", "price": 1200, "stock": 0}
        ]"#;
        let catalog = Catalog::from_json(json.as_bytes()).unwrap();

        let ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["tea", "soda"]);
        assert_eq!(
            catalog.get(&ItemId::from("tea")).unwrap().display_name,
            "Green Tea"
        );
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = Catalog::new(vec![
            CatalogEntry::new("cola", "Cola", 1100, 5),
            CatalogEntry::new("cola", "Cola Zero", 1200, 5),
        ]);
        assert!(matches!(result, Err(VendingError::InvalidCatalog(_))));
    }

    #[test]
    fn test_catalog_rejects_free_items_and_empty_lists() {
        let free = Catalog::new(vec![CatalogEntry::new("air", "Air", 0, 1)]);
        assert!(matches!(free, Err(VendingError::InvalidCatalog(_))));

        assert!(matches!(
            Catalog::new(Vec::new()),
            Err(VendingError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_catalog_from_malformed_json() {
        let result = Catalog::from_json(r#"[{"id": "tea"}]"#.as_bytes());
        assert!(matches!(result, Err(VendingError::JsonError(_))));
    }
}
