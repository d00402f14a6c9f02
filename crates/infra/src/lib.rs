//! Infrastructure layer: storage adapters and external service clients.

pub mod ai;
pub mod inventory_store;
