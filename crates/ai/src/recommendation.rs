//! Reorder recommendations and the lenient parser for generated restock plans.
//!
//! Canonical record shape (the contract stated in the forecast prompt):
//!
//! ```text
//! [{"date":"2024-01-22","recommended_stock_level":60}]
//! ```
//!
//! `level` is accepted as an alias for `recommended_stock_level`.

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

pub const UNPARSEABLE_REASON: &str = "unparseable forecast data";

/// A forecasted restock point, or the sentinel used when the plan was unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    Restock {
        date: NaiveDate,
        recommended_level: u64,
    },
    Unavailable {
        reason: String,
    },
}

impl Recommendation {
    pub fn restock(date: NaiveDate, recommended_level: u64) -> Self {
        Self::Restock {
            date,
            recommended_level,
        }
    }

    pub fn unparseable() -> Self {
        Self::Unavailable {
            reason: UNPARSEABLE_REASON.to_string(),
        }
    }
}

// Wire shape: `{"date","recommendedLevel"}`; the sentinel uses "N/A" for both
// and adds `reason`.
impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recommendation::Restock {
                date,
                recommended_level,
            } => {
                let mut s = serializer.serialize_struct("Recommendation", 2)?;
                s.serialize_field("date", date)?;
                s.serialize_field("recommendedLevel", recommended_level)?;
                s.end()
            }
            Recommendation::Unavailable { reason } => {
                let mut s = serializer.serialize_struct("Recommendation", 3)?;
                s.serialize_field("date", "N/A")?;
                s.serialize_field("recommendedLevel", "N/A")?;
                s.serialize_field("reason", reason)?;
                s.end()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestockRecord {
    date: NaiveDate,
    #[serde(alias = "level")]
    recommended_stock_level: u64,
}

/// Parse the generated `forecastedStockNeeds` text.
///
/// Never fails: anything that is not a JSON array of restock records becomes a
/// single [`Recommendation::Unavailable`] entry.
pub fn parse_forecasted_needs(text: &str) -> Vec<Recommendation> {
    match serde_json::from_str::<Vec<RestockRecord>>(strip_code_fence(text)) {
        Ok(records) => records
            .into_iter()
            .map(|r| Recommendation::restock(r.date, r.recommended_stock_level))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "forecasted stock needs were not parseable; using fallback");
            vec![Recommendation::unparseable()]
        }
    }
}

/// Models sometimes wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Language tag, any case.
    rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()).trim()
}
