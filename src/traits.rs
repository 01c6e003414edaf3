//! Common traits for the composable pairing heap
//!
//! This module provides the seams the heap is generic over:
//!
//! - [`Precedes`]: the strict "not-greater-than" ordering predicate
//! - [`HandleIndex`]: the caller-supplied key-to-handle index that the heap
//!   keeps synchronized with its forest
//!
//! It also hosts [`HeapError`], the single error type of the crate.

use std::fmt;

use crate::storage::Handle;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Delete-minimum was requested on an empty heap or an emptied handle
    EmptyHeap,
    /// The index holds no handle for the requested key
    KeyNotFound,
    /// The handle is no longer valid (its arena slot was freed)
    InvalidHandle,
    /// A child value precedes its parent's value
    OrderingViolation,
    /// The index and the forest disagree about which handle holds a value
    AliasingViolation,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "cannot delete the minimum of an empty heap"),
            HeapError::KeyNotFound => write!(f, "key is not present in the index"),
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (its node was released)")
            }
            HeapError::OrderingViolation => {
                write!(f, "heap property violated: a child precedes its parent")
            }
            HeapError::AliasingViolation => {
                write!(f, "index entry does not point at the handle holding its key")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Strict ordering predicate used to arrange the heap
///
/// `precedes(a, b)` must return true when `a` belongs strictly above `b`.
/// The predicate has to describe the same strict weak order for the whole
/// lifetime of a heap.
///
/// Any `Fn(&V, &V) -> bool` closure is a valid predicate:
///
/// ```rust
/// use composable_pairing_heap::PairingHeap;
///
/// let mut heap = PairingHeap::with_ordering(|a: &i32, b: &i32| a > b);
/// heap.insert(1);
/// heap.insert(3);
/// assert_eq!(heap.find_min(), Some(&3));
/// ```
pub trait Precedes<V> {
    /// Returns true if `a` is strictly ordered before `b`
    fn precedes(&self, a: &V, b: &V) -> bool;
}

/// Natural ascending order (`a < b`), the default predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Less;

impl<V: Ord> Precedes<V> for Less {
    #[inline]
    fn precedes(&self, a: &V, b: &V) -> bool {
        a < b
    }
}

/// Natural descending order (`a > b`), turning the heap into a max-heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Greater;

impl<V: Ord> Precedes<V> for Greater {
    #[inline]
    fn precedes(&self, a: &V, b: &V) -> bool {
        a > b
    }
}

impl<V, F> Precedes<V> for F
where
    F: Fn(&V, &V) -> bool,
{
    #[inline]
    fn precedes(&self, a: &V, b: &V) -> bool {
        self(a, b)
    }
}

/// Key-to-handle index kept in sync by the heap
///
/// The heap calls [`insert`](HandleIndex::insert) whenever a handle surfaces a
/// new top value and [`remove`](HandleIndex::remove) whenever a value leaves
/// the heap. Keys are compared only through the map's own equality/hash.
///
/// Values must be unique within one heap for index-driven deletion to be
/// unambiguous: registering a key twice overwrites the earlier handle.
pub trait HandleIndex<V> {
    /// Whether this index actually records anything
    ///
    /// Integrity checks skip index consistency when this is false.
    const TRACKS: bool = true;

    /// Binds `key` to `handle`, replacing any previous binding
    ///
    /// The key is borrowed from the node; an index that stores keys makes
    /// its own copy.
    fn insert(&mut self, key: &V, handle: Handle);

    /// Drops the binding for `key`; no-op if absent
    fn remove(&mut self, key: &V);

    /// Returns the handle bound to `key`, if any
    fn get(&self, key: &V) -> Option<Handle>;

    /// Returns true if `key` is bound
    fn contains(&self, key: &V) -> bool {
        self.get(key).is_some()
    }

    /// Like [`get`](HandleIndex::get), but reports a missing key as an error
    fn lookup(&self, key: &V) -> Result<Handle, HeapError> {
        self.get(key).ok_or(HeapError::KeyNotFound)
    }
}

/// Index that records nothing, used by heaps built without an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoIndex;

impl<V> HandleIndex<V> for NoIndex {
    const TRACKS: bool = false;

    #[inline]
    fn insert(&mut self, _key: &V, _handle: Handle) {}

    #[inline]
    fn remove(&mut self, _key: &V) {}

    #[inline]
    fn get(&self, _key: &V) -> Option<Handle> {
        None
    }
}

impl<V, I: HandleIndex<V>> HandleIndex<V> for &mut I {
    const TRACKS: bool = I::TRACKS;

    fn insert(&mut self, key: &V, handle: Handle) {
        (**self).insert(key, handle)
    }

    fn remove(&mut self, key: &V) {
        (**self).remove(key)
    }

    fn get(&self, key: &V) -> Option<Handle> {
        (**self).get(key)
    }
}
