//! Hash-table index for composing a heap with value lookup
//!
//! [`HashIndex`] is the stock [`HandleIndex`] implementation: a
//! `FxHashMap` from value to the handle of the node currently holding it.
//! Keys must be `Hash + Eq`, and `Clone` since the index keeps its own copy
//! of every registered key; the heap never looks inside them.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::storage::Handle;
use crate::traits::HandleIndex;

/// Value-to-handle map backed by `FxHashMap`
#[derive(Debug, Clone)]
pub struct HashIndex<V> {
    entries: FxHashMap<V, Handle>,
}

impl<V> Default for HashIndex<V> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<V: Hash + Eq> HashIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, key: &V) -> Option<Handle> {
        self.entries.get(key).copied()
    }

    #[inline]
    pub fn contains(&self, key: &V) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, handle)` bindings in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&V, Handle)> + '_ {
        self.entries.iter().map(|(key, handle)| (key, *handle))
    }
}

impl<V: Hash + Eq + Clone> HandleIndex<V> for HashIndex<V> {
    fn insert(&mut self, key: &V, handle: Handle) {
        match self.entries.get_mut(key) {
            Some(slot) => *slot = handle,
            None => {
                self.entries.insert(key.clone(), handle);
            }
        }
    }

    fn remove(&mut self, key: &V) {
        self.entries.remove(key);
    }

    fn get(&self, key: &V) -> Option<Handle> {
        self.entries.get(key).copied()
    }

    fn contains(&self, key: &V) -> bool {
        self.entries.contains_key(key)
    }
}
