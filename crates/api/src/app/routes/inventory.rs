use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use shopdesk_auth::Permission;
use shopdesk_core::{DomainError, ItemId};
use shopdesk_inventory::{InventoryItem, NewItem};

use crate::app::routes::common::{parse_item_id, require};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/:id", get(get_item).delete(delete_item))
        .route("/items/:id/adjust", post(adjust_stock))
        .route("/items/:id/history", get(get_history))
        .route("/items/:id/forecast", post(forecast_item))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::INVENTORY_WRITE) {
        return resp;
    }

    let new = NewItem {
        name: body.name,
        sku: body.sku,
        initial_stock: body.initial_stock,
    };
    let on = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let item = match InventoryItem::create(ItemId::new(), new, on) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.store().insert(item.clone()).await {
        return errors::store_error_to_response(e);
    }

    tracing::info!(item_id = %item.id_typed(), user_id = %principal.user_id(), "inventory item created");
    (StatusCode::CREATED, Json(dto::item_to_json(&item))).into_response()
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::INVENTORY_READ) {
        return resp;
    }

    match services.store().list().await {
        Ok(items) => {
            let items: Vec<_> = items.iter().map(dto::item_to_json).collect();
            Json(serde_json::json!({ "items": items })).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::INVENTORY_READ) {
        return resp;
    }
    let item = match load_item(&services, &id).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };

    Json(dto::item_to_json(&item)).into_response()
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::INVENTORY_WRITE) {
        return resp;
    }
    let item_id = match parse_item_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store().delete(item_id).await {
        Ok(true) => {
            tracing::info!(item_id = %item_id, user_id = %principal.user_id(), "inventory item deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => errors::domain_error_to_response(DomainError::NotFound),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::INVENTORY_WRITE) {
        return resp;
    }
    let item_id = match parse_item_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let on = body.date.unwrap_or_else(|| Utc::now().date_naive());

    match services.store().adjust_stock(item_id, body.delta, on).await {
        Ok(item) => {
            tracing::info!(item_id = %item_id, delta = body.delta, stock = item.stock(), "stock adjusted");
            Json(dto::item_to_json(&item)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_history(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::INVENTORY_READ) {
        return resp;
    }
    let item = match load_item(&services, &id).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };

    Json(dto::history_to_json(item.id_typed(), &item)).into_response()
}

/// Forecast from the stored series; the snapshot is read once and never written back.
pub async fn forecast_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::AI_FORECAST) {
        return resp;
    }
    let item = match load_item(&services, &id).await {
        Ok(item) => item,
        Err(resp) => return resp,
    };
    let series = match services.store().historical_series(item.id_typed()).await {
        Ok(series) => series,
        Err(e) => return errors::store_error_to_response(e),
    };

    match services.forecast().forecast(item.name(), &series).await {
        Ok(result) => Json(dto::forecast_to_json(&item, &result)).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

async fn load_item(services: &AppServices, raw_id: &str) -> Result<InventoryItem, axum::response::Response> {
    let item_id = parse_item_id(raw_id)?;
    match services.store().get(item_id).await {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(errors::domain_error_to_response(DomainError::NotFound)),
        Err(e) => Err(errors::store_error_to_response(e)),
    }
}
