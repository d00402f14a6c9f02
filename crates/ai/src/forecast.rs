//! Stock forecasting and reorder recommendations.
//!
//! Flow:
//! - Encode the item's historical series (deterministic compact JSON).
//! - Build an instruction embedding the item name and encoded series.
//! - Ask the generator for `{forecastedStockNeeds, analysis}`.
//! - Parse `forecastedStockNeeds` leniently; `analysis` is passed through as-is.
//!
//! Failing the primary contract (no usable generator output) is an error;
//! a malformed restock plan is downgraded to a sentinel recommendation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use shopdesk_core::HistoricalSeries;

use crate::error::AiError;
use crate::generation::{text_field, OutputSchema, StructuredGenerator};
use crate::recommendation::{parse_forecasted_needs, Recommendation};

pub const FORECASTED_NEEDS_FIELD: &str = "forecastedStockNeeds";
pub const ANALYSIS_FIELD: &str = "analysis";

/// Validated input for one forecast invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest<'a> {
    item_name: String,
    series: &'a HistoricalSeries,
}

impl<'a> ForecastRequest<'a> {
    pub fn new(item_name: &str, series: &'a HistoricalSeries) -> Result<Self, AiError> {
        Ok(Self {
            item_name: validated_item_name(item_name)?,
            series,
        })
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn series(&self) -> &HistoricalSeries {
        self.series
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastResult {
    pub analysis: String,
    pub recommendations: Vec<Recommendation>,
}

/// Raw generator output, before the restock plan is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawForecast {
    forecasted_stock_needs: String,
    analysis: String,
}

/// Stateless forecast engine around an injected generator handle.
#[derive(Clone)]
pub struct ForecastEngine {
    generator: Arc<dyn StructuredGenerator>,
}

impl ForecastEngine {
    pub fn new(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self { generator }
    }

    /// Forecast restock points for one item from a read-only series snapshot.
    ///
    /// An empty series is valid input and yields a low-confidence analysis.
    #[instrument(skip(self, series), fields(points = series.len()))]
    pub async fn forecast(
        &self,
        item_name: &str,
        series: &HistoricalSeries,
    ) -> Result<ForecastResult, AiError> {
        let request = ForecastRequest::new(item_name, series)?;
        let raw = self
            .generate(
                request.item_name(),
                &request.series().encode(),
                !request.series().is_empty(),
            )
            .await?;

        Ok(ForecastResult {
            recommendations: parse_forecasted_needs(&raw.forecasted_stock_needs),
            analysis: raw.analysis,
        })
    }

    async fn generate(
        &self,
        item_name: &str,
        encoded_history: &str,
        has_history: bool,
    ) -> Result<RawForecast, AiError> {
        let instruction = build_instruction(item_name, encoded_history, has_history);
        let output = self.generator.generate(&instruction, &forecast_schema()).await?;

        Ok(RawForecast {
            forecasted_stock_needs: text_field(&output, FORECASTED_NEEDS_FIELD)?,
            analysis: text_field(&output, ANALYSIS_FIELD)?,
        })
    }
}

/// Output contract for the forecast call.
pub fn forecast_schema() -> OutputSchema {
    OutputSchema::new()
        .text(
            FORECASTED_NEEDS_FIELD,
            "JSON array of restock points, each {\"date\": \"YYYY-MM-DD\", \"recommended_stock_level\": integer}",
        )
        .text(
            ANALYSIS_FIELD,
            "Brief analysis of the stock trend and the factors behind the forecast",
        )
}

fn build_instruction(item_name: &str, encoded_history: &str, has_history: bool) -> String {
    let mut instruction = format!(
        "You are an inventory planning assistant for an e-commerce back office.\n\
         Analyze the historical stock levels of the product \"{item_name}\" and forecast its future stock needs.\n\n\
         Historical stock data (JSON array of {{\"date\", \"level\"}} snapshots, oldest first):\n\
         {encoded_history}\n\n\
         Respond with:\n\
         - {FORECASTED_NEEDS_FIELD}: a JSON array with one entry per recommended restock point, \
         each {{\"date\": \"YYYY-MM-DD\", \"recommended_stock_level\": <non-negative integer>}}, in date order.\n\
         - {ANALYSIS_FIELD}: a short explanation of the trend and of the recommended levels.\n"
    );

    if !has_history {
        instruction.push_str(
            "\nNo historical data is available for this product. Say so in the analysis, \
             state that confidence is low, and keep any recommendation conservative.\n",
        );
    }

    instruction
}

fn validated_item_name(item_name: &str) -> Result<String, AiError> {
    let trimmed = item_name.trim();
    if trimmed.is_empty() {
        return Err(AiError::invalid_input("item name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Caller-facing request: the history arrives already serialized by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastStockInput {
    pub product_name: String,
    pub historical_stock_data: String,
}

/// Caller-facing response, mirroring the generator's two fields verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastStockOutput {
    pub forecasted_stock_needs: String,
    pub analysis: String,
}

impl ForecastStockOutput {
    fn fallback(reason: impl core::fmt::Display) -> Self {
        Self {
            forecasted_stock_needs: "[]".to_string(),
            analysis: format!("Unable to generate a stock forecast: {reason}"),
        }
    }
}

/// Forecast from caller-serialized history.
///
/// Input errors are returned. Generation failures are logged and converted to
/// the fallback object `{forecastedStockNeeds: "[]", analysis: <message>}`.
#[instrument(skip(engine, input), fields(product = %input.product_name))]
pub async fn forecast_stock(
    engine: &ForecastEngine,
    input: ForecastStockInput,
) -> Result<ForecastStockOutput, AiError> {
    let item_name = validated_item_name(&input.product_name)?;
    let history = input.historical_stock_data.trim();
    let has_history = !(history.is_empty() || history == "[]");

    match engine.generate(&item_name, history, has_history).await {
        Ok(raw) => Ok(ForecastStockOutput {
            forecasted_stock_needs: raw.forecasted_stock_needs,
            analysis: raw.analysis,
        }),
        Err(AiError::Generation(e)) => {
            warn!(error = %e, "stock forecast generation failed");
            Ok(ForecastStockOutput::fallback(e))
        }
        Err(e) => Err(e),
    }
}
