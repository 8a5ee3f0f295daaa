use super::catalog::ItemId;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Storage for the per-item remaining counts.
///
/// Only the engine's dispense step mutates a ledger, one decrement at a time.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Remaining count for `item`, or `None` if the ledger does not track it.
    async fn level(&self, item: &ItemId) -> Result<Option<u32>>;
    /// Removes one unit of `item`, never going below zero, and returns what is left.
    async fn decrement(&self, item: &ItemId) -> Result<u32>;
    async fn snapshot(&self) -> Result<BTreeMap<ItemId, u32>>;
}

pub type StockStoreBox = Box<dyn StockStore>;
