//! `shopdesk-ai`
//!
//! **Responsibility:** AI-assisted back-office flows (stock forecasts, product
//! content, business insights) built on a structured-generation service.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not mutate inventory state; it only borrows read-only snapshots.
//! - It does not know how the generation service is reached. Callers inject a
//!   [`StructuredGenerator`] (HTTP adapter in infra, stubs in tests).

pub mod content;
pub mod error;
pub mod forecast;
pub mod generation;
pub mod insights;
pub mod recommendation;

#[cfg(test)]
mod testing;

pub use content::{
    describe_product, suggest_category, suggest_names, CategorySuggestion, CategorySuggestionInput,
    ProductDescription, ProductDescriptionInput, ProductNames, ProductNamesInput,
};
pub use error::{AiError, GenerationError};
pub use forecast::{
    forecast_stock, ForecastEngine, ForecastRequest, ForecastResult, ForecastStockInput,
    ForecastStockOutput,
};
pub use generation::{FieldKind, OutputSchema, SchemaField, StructuredGenerator};
pub use insights::{business_insights, BusinessInsights, BusinessInsightsInput};
pub use recommendation::{parse_forecasted_needs, Recommendation, UNPARSEABLE_REASON};
