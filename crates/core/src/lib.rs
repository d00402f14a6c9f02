//! `shopdesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and the stock history value types shared
//! by the inventory store (owner) and the AI layer (read-only consumer).

pub mod entity;
pub mod error;
pub mod id;
pub mod series;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, UserId};
pub use series::{HistoricalSeries, StockObservation};
pub use value_object::ValueObject;
