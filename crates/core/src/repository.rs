//! Repository seam between domain components and persistence.

use std::sync::Arc;

use crate::error::StoreResult;

/// Entity marker + minimal interface.
///
/// Repositories key records by this identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Record storage for one collection.
///
/// Every method is atomic on its own. Read-validate-write sequences spanning
/// several calls are serialized by the owning component, not by the store.
pub trait Repository<V: Entity>: Send + Sync {
    /// Snapshot of all stored records, in no particular order.
    fn list(&self) -> StoreResult<Vec<V>>;

    fn get(&self, id: &V::Id) -> StoreResult<Option<V>>;

    /// Store a new record; fails with `AlreadyExists` on a key clash.
    fn insert(&self, value: V) -> StoreResult<()>;

    /// Replace an existing record; fails with `Missing` if absent.
    fn update(&self, value: V) -> StoreResult<()>;

    /// Remove a record, returning it if it was present.
    fn remove(&self, id: &V::Id) -> StoreResult<Option<V>>;
}

impl<V, S> Repository<V> for Arc<S>
where
    V: Entity,
    S: Repository<V> + ?Sized,
{
    fn list(&self) -> StoreResult<Vec<V>> {
        (**self).list()
    }

    fn get(&self, id: &V::Id) -> StoreResult<Option<V>> {
        (**self).get(id)
    }

    fn insert(&self, value: V) -> StoreResult<()> {
        (**self).insert(value)
    }

    fn update(&self, value: V) -> StoreResult<()> {
        (**self).update(value)
    }

    fn remove(&self, id: &V::Id) -> StoreResult<Option<V>> {
        (**self).remove(id)
    }
}
