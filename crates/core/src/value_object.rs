//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values.
/// A `StockObservation { date: 2024-01-01, level: 50 }` is a value object;
/// an `InventoryItem` with an id is an entity.
///
/// To "modify" a value object, build a new one. `HistoricalSeries` is the
/// one with a mutating API: it grows by `append`, and only the latest day's
/// closing level can change, through `record_closing`.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
