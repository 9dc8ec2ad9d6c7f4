use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use salonbook_core::{Entity, Repository, StoreError, StoreResult};

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::unavailable("in-memory store lock poisoned")
}

/// In-memory record store for dev and tests.
#[derive(Debug)]
pub struct InMemoryRepository<V: Entity> {
    inner: RwLock<HashMap<V::Id, V>>,
}

impl<V: Entity> InMemoryRepository<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.inner.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<V: Entity> Default for InMemoryRepository<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Repository<V> for InMemoryRepository<V>
where
    V: Entity + Clone + Send + Sync,
    V::Id: Send + Sync,
{
    fn list(&self) -> StoreResult<Vec<V>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn get(&self, id: &V::Id) -> StoreResult<Option<V>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn insert(&self, value: V) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let id = value.id().clone();
        if map.contains_key(&id) {
            return Err(StoreError::already_exists(id));
        }
        map.insert(id, value);
        Ok(())
    }

    fn update(&self, value: V) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        match map.get_mut(value.id()) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(StoreError::missing(value.id())),
        }
    }

    fn remove(&self, id: &V::Id) -> StoreResult<Option<V>> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(id))
    }
}
