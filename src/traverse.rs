//! Structural traversal and integrity checking
//!
//! [`PairingHeap::traverse`] walks the forest in pre-order and yields a
//! [`Step`] per structural element. The walk is lazy and reads the current
//! tree fresh on every call, so it can be restarted at will; it never mutates.
//! [`PairingHeap::fold`] and [`PairingHeap::verify`] are built on it.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::pairing::PairingHeap;
use crate::storage::{Forest, Handle, HeapNode};
use crate::traits::{HandleIndex, HeapError, Precedes};

/// One element of a pre-order walk over the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a, V> {
    /// Entering the slot named by this handle
    EnteringHandle(Handle),
    /// The slot holds a populated node
    EnteringNode,
    /// The populated node's value; its children follow
    EnteringValue(&'a V),
    /// The slot holds an empty node
    EnteringEmpty,
}

/// Lazy pre-order walk over a heap's forest
///
/// Created by [`PairingHeap::traverse`].
pub struct Traverse<'a, V> {
    forest: &'a Forest<V>,
    pending: Vec<Handle>,
    buffered: VecDeque<Step<'a, V>>,
}

impl<'a, V> Iterator for Traverse<'a, V> {
    type Item = Step<'a, V>;

    fn next(&mut self) -> Option<Step<'a, V>> {
        if let Some(step) = self.buffered.pop_front() {
            return Some(step);
        }

        let handle = self.pending.pop()?;
        match self.forest.get(handle) {
            Some(HeapNode::Populated { value, children }) => {
                self.buffered.push_back(Step::EnteringNode);
                self.buffered.push_back(Step::EnteringValue(value));
                self.pending.extend(children.iter().rev().copied());
            }
            Some(HeapNode::Empty) | None => self.buffered.push_back(Step::EnteringEmpty),
        }
        Some(Step::EnteringHandle(handle))
    }
}

impl<V, C, I> PairingHeap<V, C, I> {
    /// Walks the forest in pre-order, starting at the root handle
    pub fn traverse(&self) -> Traverse<'_, V> {
        Traverse {
            forest: &self.forest,
            pending: vec![self.root],
            buffered: VecDeque::with_capacity(2),
        }
    }

    /// Folds `visit` over a pre-order walk of the forest
    ///
    /// # Example
    ///
    /// ```rust
    /// use composable_pairing_heap::{PairingHeap, Step};
    ///
    /// let heap: PairingHeap<i32> = [3, 1, 2].into_iter().collect();
    /// let sum = heap.fold(0, |acc, step| match step {
    ///     Step::EnteringValue(v) => acc + v,
    ///     _ => acc,
    /// });
    /// assert_eq!(sum, 6);
    /// ```
    pub fn fold<B, F>(&self, seed: B, visit: F) -> B
    where
        F: FnMut(B, Step<'_, V>) -> B,
    {
        self.traverse().fold(seed, visit)
    }
}

impl<V, C, I> PairingHeap<V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
    /// Checks the structural invariants of the heap
    ///
    /// - every child value is not ordered before its parent's value
    /// - no handle is reachable from two parents
    /// - the number of populated nodes equals [`len`](Self::len)
    /// - when the index tracks, every value maps back to the handle holding
    ///   it (this assumes values are unique)
    ///
    /// # Errors
    /// [`HeapError::OrderingViolation`] or [`HeapError::AliasingViolation`].
    pub fn verify(&self) -> Result<(), HeapError> {
        let mut seen: FxHashSet<Handle> = FxHashSet::default();
        let mut pending = vec![(self.root, None::<&V>)];
        let mut populated = 0usize;

        while let Some((handle, parent)) = pending.pop() {
            if !seen.insert(handle) {
                return Err(HeapError::AliasingViolation);
            }
            let Some(HeapNode::Populated { value, children }) = self.forest.get(handle) else {
                continue;
            };
            populated += 1;

            if let Some(parent) = parent {
                if self.ordering.precedes(value, parent) {
                    return Err(HeapError::OrderingViolation);
                }
            }
            if I::TRACKS && self.index.get(value) != Some(handle) {
                return Err(HeapError::AliasingViolation);
            }
            pending.extend(children.iter().map(|child| (*child, Some(value))));
        }

        if populated != self.len() {
            return Err(HeapError::AliasingViolation);
        }
        Ok(())
    }
}
