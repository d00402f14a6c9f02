//! Business insights over caller-prepared sales/inventory figures.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AiError;
use crate::generation::{text_field, text_list_field, OutputSchema, StructuredGenerator};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInsightsInput {
    /// Summary figures (totals, top sellers, low-stock items...) serialized by the caller.
    pub business_data: String,
    /// Optional question or area to focus on (e.g. "festival season demand").
    #[serde(default)]
    pub focus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessInsights {
    pub summary: String,
    pub insights: Vec<String>,
}

#[instrument(skip(generator, input), fields(data_len = input.business_data.len()))]
pub async fn business_insights(
    generator: &dyn StructuredGenerator,
    input: &BusinessInsightsInput,
) -> Result<BusinessInsights, AiError> {
    let data = input.business_data.trim();
    if data.is_empty() {
        return Err(AiError::invalid_input("business data cannot be empty"));
    }

    let mut instruction = format!(
        "You are a retail business analyst. Review the following store figures and report \
         the most important observations and recommended actions.\n\n\
         Data:\n{data}\n"
    );
    if let Some(focus) = input.focus.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        instruction.push_str(&format!("\nFocus on: {focus}\n"));
    }
    instruction.push_str("\nOnly draw conclusions supported by the data.\n");

    let schema = OutputSchema::new()
        .text("summary", "Two or three sentence overview")
        .text_list("insights", "Actionable insights, one per entry");
    let output = generator.generate(&instruction, &schema).await?;

    Ok(BusinessInsights {
        summary: text_field(&output, "summary")?,
        insights: text_list_field(&output, "insights")?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::StubGenerator;

    #[tokio::test]
    async fn returns_summary_and_insights() {
        let stub = StubGenerator::returning(json!({
            "summary": "Sales are up 12% week over week.",
            "insights": ["Restock Desi Ghee before the festival", "Bundle rice with lentils"],
        }));
        let input = BusinessInsightsInput {
            business_data: "revenue: 12000\ntop: Desi Ghee".to_string(),
            focus: Some("festival season".to_string()),
        };

        let out = business_insights(&stub, &input).await.unwrap();

        assert_eq!(out.insights.len(), 2);
        assert!(stub.last_instruction().contains("Focus on: festival season"));
        assert!(stub.last_instruction().contains("top: Desi Ghee"));
    }

    #[tokio::test]
    async fn empty_data_is_rejected_before_generation() {
        let stub = StubGenerator::returning(json!({ "summary": "", "insights": [] }));
        let input = BusinessInsightsInput {
            business_data: "\n".to_string(),
            focus: None,
        };

        assert!(matches!(
            business_insights(&stub, &input).await,
            Err(AiError::InvalidInput(_))
        ));
        assert_eq!(stub.calls(), 0);
    }
}
