use std::collections::HashMap;

use crate::entity::{Entity, Handle};

/// Identity map: primary key to the one in-memory instance for that row
///
/// Owned by a [`Mapper`](crate::mapper::Mapper), one per entity kind.
/// Entries are added when an instance is first persisted or first loaded,
/// and removed when it is deleted or its table is dropped. There is no
/// capacity eviction. Not thread-safe; designed for single-threaded use.
pub struct IdentityMap<E: Entity> {
    entries: HashMap<E::Id, Handle<E>>,
}

impl<E: Entity> IdentityMap<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: &E::Id) -> Option<&Handle<E>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.entries.contains_key(id)
    }

    /// Register `handle` under `id`, returning any handle it displaced
    pub fn insert(&mut self, id: E::Id, handle: Handle<E>) -> Option<Handle<E>> {
        self.entries.insert(id, handle)
    }

    pub fn remove(&mut self, id: &E::Id) -> Option<Handle<E>> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, yielding the evicted handles
    pub fn drain(&mut self) -> impl Iterator<Item = Handle<E>> + '_ {
        self.entries.drain().map(|(_, handle)| handle)
    }
}

impl<E: Entity> Default for IdentityMap<E> {
    fn default() -> Self {
        Self::new()
    }
}
