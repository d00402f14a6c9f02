use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use shopdesk_core::{DomainError, HistoricalSeries, ItemId};
use shopdesk_inventory::{InventoryItem, InventoryStore, StoreError, StoreResult};

/// In-memory document store for tests/dev.
///
/// Keyed by `ItemId` (UUIDv7), so iteration order is creation order.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<BTreeMap<ItemId, InventoryItem>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<ItemId, InventoryItem>>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("inventory lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<ItemId, InventoryItem>>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("inventory lock poisoned".to_string()))
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn insert(&self, item: InventoryItem) -> StoreResult<()> {
        let mut items = self.write()?;
        let id = item.id_typed();

        if items.contains_key(&id) {
            return Err(DomainError::conflict(format!("item {id} already exists")).into());
        }
        if let Some(sku) = item.sku() {
            if items.values().any(|existing| existing.sku() == Some(sku)) {
                return Err(DomainError::conflict(format!("sku '{sku}' is already in use")).into());
            }
        }

        debug!(item_id = %id, "inventory item inserted");
        items.insert(id, item);
        Ok(())
    }

    async fn get(&self, id: ItemId) -> StoreResult<Option<InventoryItem>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn delete(&self, id: ItemId) -> StoreResult<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn historical_series(&self, id: ItemId) -> StoreResult<HistoricalSeries> {
        self.read()?
            .get(&id)
            .map(|item| item.history().clone())
            .ok_or_else(|| DomainError::not_found().into())
    }

    async fn adjust_stock(&self, id: ItemId, delta: i64, on: NaiveDate) -> StoreResult<InventoryItem> {
        let mut items = self.write()?;
        let item = items.get_mut(&id).ok_or(DomainError::NotFound)?;
        let observation = item.adjust_stock(delta, on)?;
        debug!(item_id = %id, date = %observation.date, level = observation.level, "stock observation recorded");
        Ok(item.clone())
    }
}
