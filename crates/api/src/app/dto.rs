use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use shopdesk_ai::ForecastResult;
use shopdesk_core::ItemId;
use shopdesk_inventory::InventoryItem;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub initial_stock: u64,
    /// Date of the opening stock count; defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
    /// Date the resulting level is recorded for; defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn item_to_json(item: &InventoryItem) -> serde_json::Value {
    json!({
        "id": item.id_typed().to_string(),
        "name": item.name(),
        "sku": item.sku(),
        "stock": item.stock(),
        "last_recorded": item.history().latest().map(|o| o.date),
        "observations": item.history().len(),
    })
}

pub fn history_to_json(item_id: ItemId, item: &InventoryItem) -> serde_json::Value {
    json!({
        "item_id": item_id.to_string(),
        "name": item.name(),
        "history": item.history(),
    })
}

pub fn forecast_to_json(item: &InventoryItem, result: &ForecastResult) -> serde_json::Value {
    json!({
        "item_id": item.id_typed().to_string(),
        "name": item.name(),
        "analysis": result.analysis,
        "recommendations": result.recommendations,
    })
}
