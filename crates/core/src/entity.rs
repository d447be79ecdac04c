//! Entity trait: records with a stable identifier.

/// A record that can be looked up by its identifier.
///
/// Every collection in the data layer stores `Entity` values; the store uses
/// `id()` for lookups and replacement.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
