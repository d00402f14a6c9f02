//! Stock history value types and their textual codec.
//!
//! The codec is a compact JSON array with a fixed field order:
//!
//! ```text
//! [{"date":"2024-01-01","level":50},{"date":"2024-01-08","level":40}]
//! ```
//!
//! Encoding is deterministic (same series → same bytes), which keeps prompts
//! reproducible and lets collaborators key caches on the encoded form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// One on-hand quantity snapshot for an item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockObservation {
    pub date: NaiveDate,
    pub level: u64,
}

impl StockObservation {
    pub fn new(date: NaiveDate, level: u64) -> Self {
        Self { date, level }
    }
}

impl ValueObject for StockObservation {}

/// Ordered log of daily closing stock levels for one item.
///
/// # Invariants
/// - Dates are strictly ascending (which also makes them unique).
/// - Observations before the latest date are never reordered or rewritten.
///   The latest day's level is its closing snapshot and may be updated by
///   [`HistoricalSeries::record_closing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StockObservation>", into = "Vec<StockObservation>")]
pub struct HistoricalSeries {
    observations: Vec<StockObservation>,
}

impl HistoricalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from observations that must already be in date order.
    pub fn from_observations(observations: Vec<StockObservation>) -> DomainResult<Self> {
        for pair in observations.windows(2) {
            ensure_after(&pair[0], &pair[1])?;
        }
        Ok(Self { observations })
    }

    /// Append a new observation; its date must be after the latest one.
    pub fn append(&mut self, observation: StockObservation) -> DomainResult<()> {
        if let Some(last) = self.observations.last() {
            ensure_after(last, &observation)?;
        }
        self.observations.push(observation);
        Ok(())
    }

    /// Record the closing level for `observation.date`.
    ///
    /// A later date appends; the latest date has its level replaced. Dates
    /// before the latest one are rejected as a conflict.
    pub fn record_closing(&mut self, observation: StockObservation) -> DomainResult<()> {
        match self.observations.last_mut() {
            Some(last) if observation.date < last.date => {
                return Err(DomainError::conflict(format!(
                    "stock history already closed through {} (observation dated {})",
                    last.date, observation.date
                )));
            }
            Some(last) if observation.date == last.date => {
                last.level = observation.level;
                return Ok(());
            }
            _ => {}
        }
        self.observations.push(observation);
        Ok(())
    }

    pub fn observations(&self) -> &[StockObservation] {
        &self.observations
    }

    pub fn latest(&self) -> Option<&StockObservation> {
        self.observations.last()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Encode to the compact textual form.
    pub fn encode(&self) -> String {
        // Plain dates and integers always serialize.
        serde_json::to_string(&self.observations).unwrap_or_else(|_| String::from("[]"))
    }

    /// Decode the compact textual form, re-checking the ordering invariant.
    pub fn decode(text: &str) -> DomainResult<Self> {
        let observations: Vec<StockObservation> = serde_json::from_str(text)
            .map_err(|e| DomainError::validation(format!("malformed stock history: {e}")))?;
        Self::from_observations(observations)
    }
}

impl ValueObject for HistoricalSeries {}

impl TryFrom<Vec<StockObservation>> for HistoricalSeries {
    type Error = DomainError;

    fn try_from(value: Vec<StockObservation>) -> Result<Self, Self::Error> {
        Self::from_observations(value)
    }
}

impl From<HistoricalSeries> for Vec<StockObservation> {
    fn from(value: HistoricalSeries) -> Self {
        value.observations
    }
}

fn ensure_after(prev: &StockObservation, next: &StockObservation) -> DomainResult<()> {
    if next.date <= prev.date {
        return Err(DomainError::invariant(format!(
            "observation dated {} must come after {}",
            next.date, prev.date
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn declining() -> HistoricalSeries {
        HistoricalSeries::from_observations(vec![
            StockObservation::new(d(2024, 1, 1), 50),
            StockObservation::new(d(2024, 1, 8), 40),
            StockObservation::new(d(2024, 1, 15), 20),
        ])
        .unwrap()
    }

    #[test]
    fn encode_is_compact_and_field_ordered() {
        assert_eq!(
            declining().encode(),
            r#"[{"date":"2024-01-01","level":50},{"date":"2024-01-08","level":40},{"date":"2024-01-15","level":20}]"#
        );
    }

    #[test]
    fn empty_series_encodes_as_empty_array() {
        assert_eq!(HistoricalSeries::new().encode(), "[]");
        assert!(HistoricalSeries::decode("[]").unwrap().is_empty());
    }

    #[test]
    fn append_rejects_same_or_earlier_date() {
        let mut series = declining();
        let err = series.append(StockObservation::new(d(2024, 1, 15), 10)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(series.append(StockObservation::new(d(2024, 1, 2), 10)).is_err());
        assert_eq!(series.len(), 3);

        series.append(StockObservation::new(d(2024, 1, 22), 60)).unwrap();
        assert_eq!(series.latest().unwrap().level, 60);
    }

    #[test]
    fn record_closing_replaces_same_day_and_keeps_earlier_days() {
        let mut series = declining();

        series.record_closing(StockObservation::new(d(2024, 1, 15), 12)).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.latest(), Some(&StockObservation::new(d(2024, 1, 15), 12)));

        let err = series
            .record_closing(StockObservation::new(d(2024, 1, 8), 99))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(series.observations()[1].level, 40);

        series.record_closing(StockObservation::new(d(2024, 1, 16), 30)).unwrap();
        assert_eq!(series.len(), 4);

        let mut empty = HistoricalSeries::new();
        empty.record_closing(StockObservation::new(d(2024, 1, 1), 5)).unwrap();
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn decode_rejects_out_of_order_input() {
        let text = r#"[{"date":"2024-01-08","level":40},{"date":"2024-01-01","level":50}]"#;
        assert!(matches!(
            HistoricalSeries::decode(text),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn decode_rejects_negative_levels() {
        let text = r#"[{"date":"2024-01-01","level":-5}]"#;
        assert!(matches!(HistoricalSeries::decode(text), Err(DomainError::Validation(_))));
    }

    #[test]
    fn serde_goes_through_the_same_validation() {
        let bad = serde_json::json!([
            {"date": "2024-01-01", "level": 1},
            {"date": "2024-01-01", "level": 2}
        ]);
        assert!(serde_json::from_value::<HistoricalSeries>(bad).is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: decode(encode(series)) yields the same observations in the same order.
            #[test]
            fn codec_round_trip_preserves_order(
                steps in proptest::collection::vec((1i64..30, 0u64..10_000), 0..50)
            ) {
                let mut date = d(2023, 1, 1);
                let mut series = HistoricalSeries::new();
                for (gap, level) in steps {
                    date += chrono::Duration::days(gap);
                    series.append(StockObservation::new(date, level)).unwrap();
                }

                let decoded = HistoricalSeries::decode(&series.encode()).unwrap();
                prop_assert_eq!(decoded.observations(), series.observations());
            }
        }
    }
}
