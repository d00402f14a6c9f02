//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Inventory items are entities: two items with the same name and stock are
/// still different items if their ids differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
