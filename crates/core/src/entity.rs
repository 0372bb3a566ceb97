//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identifiers are ordered so stores can list records in insertion order.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy
        + Eq
        + Ord
        + core::hash::Hash
        + core::fmt::Debug
        + From<i64>
        + Into<i64>
        + Send
        + Sync
        + 'static;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
