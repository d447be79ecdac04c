use std::fmt::Display;
use std::sync::{Arc, PoisonError, RwLock};

use logihub_core::{DomainError, DomainResult, Entity};

/// Ordered collection of records keyed by their entity id.
pub trait RecordStore<V: Entity>: Send + Sync {
    fn list(&self) -> Vec<V>;
    fn get(&self, id: &V::Id) -> Option<V>;
    /// Append a new record; `Conflict` if the id is taken.
    fn insert(&self, value: V) -> DomainResult<V>;
    /// Swap a record in place; `NotFound` if absent.
    fn replace(&self, value: V) -> DomainResult<V>;
    fn remove(&self, id: &V::Id) -> DomainResult<V>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V, S> RecordStore<V> for Arc<S>
where
    V: Entity,
    S: RecordStore<V> + ?Sized,
{
    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn get(&self, id: &V::Id) -> Option<V> {
        (**self).get(id)
    }

    fn insert(&self, value: V) -> DomainResult<V> {
        (**self).insert(value)
    }

    fn replace(&self, value: V) -> DomainResult<V> {
        (**self).replace(value)
    }

    fn remove(&self, id: &V::Id) -> DomainResult<V> {
        (**self).remove(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory store. Insertion order is preserved for listing.
#[derive(Debug)]
pub struct InMemoryRecordStore<V> {
    inner: RwLock<Vec<V>>,
}

impl<V> InMemoryRecordStore<V> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<V>) -> Self {
        Self { inner: RwLock::new(records) }
    }
}

impl<V> Default for InMemoryRecordStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> InMemoryRecordStore<V>
where
    V: Entity + Clone + Send + Sync,
    V::Id: Display,
{
    /// Read-modify-write under a single write lock.
    pub fn update<F>(&self, id: &V::Id, f: F) -> DomainResult<V>
    where
        F: FnOnce(&V) -> DomainResult<V>,
    {
        let mut rows = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("record {id}")))?;
        let updated = f(slot)?;
        *slot = updated.clone();
        Ok(updated)
    }
}

impl<V> RecordStore<V> for InMemoryRecordStore<V>
where
    V: Entity + Clone + Send + Sync,
    V::Id: Display,
{
    fn list(&self) -> Vec<V> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn get(&self, id: &V::Id) -> Option<V> {
        let rows = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        rows.iter().find(|r| r.id() == id).cloned()
    }

    fn insert(&self, value: V) -> DomainResult<V> {
        let mut rows = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if rows.iter().any(|r| r.id() == value.id()) {
            return Err(DomainError::conflict(format!("record {} already exists", value.id())));
        }
        rows.push(value.clone());
        Ok(value)
    }

    fn replace(&self, value: V) -> DomainResult<V> {
        let mut rows = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == value.id())
            .ok_or_else(|| DomainError::not_found(format!("record {}", value.id())))?;
        *slot = value.clone();
        Ok(value)
    }

    fn remove(&self, id: &V::Id) -> DomainResult<V> {
        let mut rows = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let idx = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("record {id}")))?;
        Ok(rows.remove(idx))
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
