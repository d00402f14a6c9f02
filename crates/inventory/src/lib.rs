//! Inventory domain module.
//!
//! Business rules for inventory items and their stock history, implemented as
//! deterministic domain logic (no IO, no HTTP). Persistence goes through the
//! [`InventoryStore`] port; adapters live in `shopdesk-infra`.

pub mod item;
pub mod store;

pub use item::{InventoryItem, NewItem};
pub use store::{InventoryStore, StoreError, StoreResult};
