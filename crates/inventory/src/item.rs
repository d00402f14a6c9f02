use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopdesk_core::{DomainError, DomainResult, Entity, HistoricalSeries, ItemId, StockObservation};

/// Validated input for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub sku: Option<String>,
    pub initial_stock: u64,
}

/// Inventory item document.
///
/// # Invariants
/// - `name` is non-blank.
/// - `stock` equals the level of the latest history observation.
/// - History holds one closing observation per day; earlier days never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    sku: Option<String>,
    stock: u64,
    history: HistoricalSeries,
}

impl InventoryItem {
    /// Create an item and record its opening stock level for `on`.
    pub fn create(id: ItemId, new: NewItem, on: NaiveDate) -> DomainResult<Self> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let sku = match new.sku.as_deref().map(str::trim) {
            Some("") => return Err(DomainError::validation("sku cannot be blank")),
            Some(s) => Some(s.to_string()),
            None => None,
        };

        let mut history = HistoricalSeries::new();
        history.append(StockObservation::new(on, new.initial_stock))?;

        Ok(Self {
            id,
            name: name.to_string(),
            sku,
            stock: new.initial_stock,
            history,
        })
    }

    /// Apply a stock delta and record the resulting level as the closing
    /// snapshot for `on`.
    ///
    /// Several adjustments on one day collapse into that day's observation.
    /// Adjustments dated before the latest observation are a conflict, and the
    /// item is left unchanged on any error.
    pub fn adjust_stock(&mut self, delta: i64, on: NaiveDate) -> DomainResult<StockObservation> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let new_stock = self.stock.checked_add_signed(delta).ok_or_else(|| {
            DomainError::invariant(format!(
                "adjusting stock {} by {delta} leaves the range 0..={}",
                self.stock,
                u64::MAX
            ))
        })?;

        let observation = StockObservation::new(on, new_stock);
        self.history.record_closing(observation)?;
        self.stock = new_stock;
        Ok(observation)
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn history(&self) -> &HistoricalSeries {
        &self.history
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
