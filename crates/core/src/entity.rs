//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities with the same identifier are the same entity, even when their
/// attributes differ (e.g. a product listed twice with different prices).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` carries the same identity as `self`.
    fn same_identity<E>(&self, other: &E) -> bool
    where
        E: Entity<Id = Self::Id>,
    {
        self.id() == other.id()
    }
}
