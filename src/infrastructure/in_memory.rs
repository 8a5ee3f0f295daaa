use crate::domain::catalog::{Catalog, ItemId};
use crate::domain::ports::StockStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory stock ledger.
///
/// Uses `Arc<RwLock<BTreeMap<ItemId, u32>>>` so clones share the same counts.
/// State lives only as long as the process.
#[derive(Default, Clone)]
pub struct InMemoryStockLedger {
    levels: Arc<RwLock<BTreeMap<ItemId, u32>>>,
}

impl InMemoryStockLedger {
    /// Creates an empty ledger that tracks no items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger seeded with each catalog entry's starting stock.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let levels: BTreeMap<ItemId, u32> = catalog
            .entries()
            .iter()
            .map(|entry| (entry.id.clone(), entry.stock))
            .collect();
        Self {
            levels: Arc::new(RwLock::new(levels)),
        }
    }
}

#[async_trait]
impl StockStore for InMemoryStockLedger {
    async fn level(&self, item: &ItemId) -> Result<Option<u32>> {
        let levels = self.levels.read().await;
        Ok(levels.get(item).copied())
    }

    async fn decrement(&self, item: &ItemId) -> Result<u32> {
        let mut levels = self.levels.write().await;
        let count = levels.entry(item.clone()).or_insert(0);
        *count = count.saturating_sub(1);
        Ok(*count)
    }

    async fn snapshot(&self) -> Result<BTreeMap<ItemId, u32>> {
        let levels = self.levels.read().await;
        Ok(levels.clone())
    }
}
