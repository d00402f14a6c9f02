use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use shopdesk_core::{DomainError, HistoricalSeries, ItemId};

use crate::item::InventoryItem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backing document store failed (connection, serialization, poisoning...).
    #[error("inventory store unavailable: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store holding inventory items and their stock history.
///
/// The store is the system of record for each item's [`HistoricalSeries`];
/// readers get an owned snapshot and never mutate the stored series.
#[async_trait]
pub trait InventoryStore: Send + Sync + 'static {
    /// Insert a new item. SKUs, when present, are unique.
    async fn insert(&self, item: InventoryItem) -> StoreResult<()>;

    async fn get(&self, id: ItemId) -> StoreResult<Option<InventoryItem>>;

    /// All items, oldest first.
    async fn list(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Returns `false` when the item did not exist.
    async fn delete(&self, id: ItemId) -> StoreResult<bool>;

    /// Read path used by forecasting.
    async fn historical_series(&self, id: ItemId) -> StoreResult<HistoricalSeries>;

    /// Append path: apply a stock delta and record the resulting level for `on`.
    async fn adjust_stock(&self, id: ItemId, delta: i64, on: NaiveDate) -> StoreResult<InventoryItem>;
}
