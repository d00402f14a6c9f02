//! Generation-backed assistant endpoints. Request bodies use camelCase keys.

use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use shopdesk_ai::{
    business_insights, describe_product, forecast_stock, suggest_category, suggest_names,
    BusinessInsightsInput, CategorySuggestionInput, ForecastStockInput, ProductDescriptionInput,
    ProductNamesInput,
};
use shopdesk_auth::Permission;

use crate::app::errors;
use crate::app::routes::common::require;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/forecast-stock", post(forecast_stock_handler))
        .route("/product-description", post(product_description))
        .route("/product-category", post(product_category))
        .route("/product-names", post(product_names))
        .route("/business-insights", post(insights))
}

/// Generation failures come back as a 200 with the fallback body.
pub async fn forecast_stock_handler(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<ForecastStockInput>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::AI_FORECAST) {
        return resp;
    }

    match forecast_stock(services.forecast(), body).await {
        Ok(out) => Json(out).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

pub async fn product_description(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<ProductDescriptionInput>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::AI_CONTENT) {
        return resp;
    }

    match describe_product(services.generator(), &body).await {
        Ok(out) => Json(out).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

pub async fn product_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CategorySuggestionInput>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::AI_CONTENT) {
        return resp;
    }

    match suggest_category(services.generator(), &body).await {
        Ok(out) => Json(out).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

pub async fn product_names(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<ProductNamesInput>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::AI_CONTENT) {
        return resp;
    }

    match suggest_names(services.generator(), &body).await {
        Ok(out) => Json(out).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}

pub async fn insights(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<BusinessInsightsInput>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &Permission::AI_CONTENT) {
        return resp;
    }

    match business_insights(services.generator(), &body).await {
        Ok(out) => Json(out).into_response(),
        Err(e) => errors::ai_error_to_response(e),
    }
}
