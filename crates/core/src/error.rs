//! Failures of the inventory domain: bad item input, stock that would leave
//! its range, unknown items, and stock history that is already closed.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic inventory failure. Store outages and generation failures are
/// reported by `StoreError::Backend` and `GenerationError`, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input: blank item name or SKU, zero stock delta, malformed
    /// stock history text.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The change would break a stock rule, e.g. a level outside `0..=u64::MAX`
    /// or history observations out of date order.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An item or user id that is not a UUID.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No inventory item with the requested id.
    #[error("not found")]
    NotFound,

    /// Duplicate item id or SKU, or an adjustment dated before the latest
    /// recorded day.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_inventory_context() {
        assert_eq!(
            DomainError::conflict("sku 'GHEE-1KG' is already in use").to_string(),
            "conflict: sku 'GHEE-1KG' is already in use"
        );
        assert_eq!(
            DomainError::validation("delta cannot be zero").to_string(),
            "validation failed: delta cannot be zero"
        );
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
