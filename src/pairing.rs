//! Composable Pairing Heap implementation
//!
//! A pairing heap is a heap-ordered multiway forest with:
//! - O(1) insert, find-min and meld
//! - O(log n) amortized delete-min
//!
//! This heap can additionally be composed with an external index (any
//! [`HandleIndex`]) mapping each value to the [`Handle`] of the node that
//! holds it. The heap keeps that index synchronized on every restructuring,
//! which turns deletion of an arbitrary value into an O(1) dispatch to its
//! node followed by a local delete-min, with no walk up the tree.
//!
//! # Handle sharing
//!
//! A node's handle is referenced from two unrelated places: its parent's
//! children list and the index. Both hold the same arena key, so deleting the
//! top of a node overwrites that slot in place and the parent observes the
//! replacement without being touched. A handle emptied this way stays in its
//! parent's children list until the parent's next delete-min absorbs it, or
//! until the parent wins a meld while the emptied handle trails its children,
//! whichever comes first. Either way the slot is released.
//!
//! Handles name slots, not values: after a delete-min the surviving subtree
//! is moved into the deleted node's slot, so look handles up through the index
//! rather than holding on to them across mutations.
//!
//! # Duplicate values
//!
//! The index is keyed by value. When a value is inserted twice, the later
//! registration overwrites the earlier one, and [`PairingHeap::delete_value`]
//! may remove either physical copy. Use unique (e.g. composite) keys when
//! deleting through the index.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use slotmap::SecondaryMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::storage::{Children, Forest, Handle, HeapNode};
use crate::traits::{HandleIndex, HeapError, Less, NoIndex, Precedes};

/// Index synchronization event delivered to a sync hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent<'a, V> {
    /// `key` became the surfaced top value of `handle`
    Registered { key: &'a V, handle: Handle },
    /// `key` left the heap and was removed from the index
    Unregistered { key: &'a V },
}

type SyncHook<V> = Box<dyn FnMut(&SyncEvent<'_, V>)>;

/// Pairing heap composable with an external value-to-handle index
///
/// # Example
///
/// ```rust
/// use composable_pairing_heap::{HashIndex, PairingHeap};
///
/// let mut heap = PairingHeap::with_index(HashIndex::default());
/// for x in [5, 2, 7, 4, 6, 3] {
///     heap.insert(x);
/// }
/// assert!(heap.delete_value(&2));
/// assert!(heap.delete_value(&5));
/// assert_eq!(heap.into_sorted_vec(), vec![3, 4, 6, 7]);
/// ```
pub struct PairingHeap<V, C = Less, I = NoIndex> {
    pub(crate) forest: Forest<V>,
    pub(crate) root: Handle,
    pub(crate) ordering: C,
    pub(crate) index: I,
    len: usize,
    hook: Option<SyncHook<V>>,
}

impl<V> PairingHeap<V> {
    /// Creates an empty min-heap with no index
    pub fn new() -> Self {
        Self::with_ordering_and_index(Less, NoIndex)
    }

    /// Creates an empty min-heap whose arena has room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        let mut forest = Forest::with_capacity(capacity + 1);
        let root = forest.insert(HeapNode::Empty);
        Self {
            forest,
            root,
            ordering: Less,
            index: NoIndex,
            len: 0,
            hook: None,
        }
    }
}

impl<V, C> PairingHeap<V, C, NoIndex> {
    /// Creates an empty heap arranged by `ordering`, with no index
    pub fn with_ordering(ordering: C) -> Self {
        Self::with_ordering_and_index(ordering, NoIndex)
    }
}

impl<V, I> PairingHeap<V, Less, I> {
    /// Creates an empty min-heap kept in sync with `index`
    pub fn with_index(index: I) -> Self {
        Self::with_ordering_and_index(Less, index)
    }
}

impl<V, C, I> PairingHeap<V, C, I> {
    /// Creates an empty heap arranged by `ordering` and kept in sync with `index`
    pub fn with_ordering_and_index(ordering: C, index: I) -> Self {
        let mut forest = Forest::default();
        let root = forest.insert(HeapNode::Empty);
        Self {
            forest,
            root,
            ordering,
            index,
            len: 0,
            hook: None,
        }
    }

    /// Installs a hook that observes every index registration and removal
    pub fn with_sync_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&SyncEvent<'_, V>) + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Returns true if the heap holds no values
    pub fn is_empty(&self) -> bool {
        self.find_min().is_none()
    }

    /// Returns the number of values in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the top value without removing it
    ///
    /// # Time Complexity
    /// O(1)
    pub fn find_min(&self) -> Option<&V> {
        self.forest.get(self.root).and_then(HeapNode::value)
    }

    /// Alias for [`find_min`](Self::find_min)
    pub fn peek(&self) -> Option<&V> {
        self.find_min()
    }

    /// Returns the handle currently at the top of the forest
    pub fn root(&self) -> Handle {
        self.root
    }

    /// Returns the top value held by `handle`, if the handle is live and populated
    pub fn value(&self, handle: Handle) -> Option<&V> {
        self.forest.get(handle).and_then(HeapNode::value)
    }

    /// Returns true if `handle` names a live slot of this heap
    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.forest.contains(handle)
    }

    /// The index this heap keeps synchronized
    pub fn index(&self) -> &I {
        &self.index
    }

    /// The ordering predicate this heap was built with
    pub fn ordering(&self) -> &C {
        &self.ordering
    }

    /// Consumes the heap, returning its index
    pub fn into_index(self) -> I {
        self.index
    }

    /// Iterates over the values in pre-order (not sorted)
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.traverse().filter_map(|step| match step {
            crate::traverse::Step::EnteringValue(value) => Some(value),
            _ => None,
        })
    }
}

impl<V, C, I> PairingHeap<V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
    /// Inserts a value
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, value: V) {
        let handle = self.forest.insert(HeapNode::singleton(value));
        self.register(handle);
        self.root = self.meld(self.root, handle);
        self.len += 1;
    }

    /// Alias for [`insert`](Self::insert)
    pub fn push(&mut self, value: V) {
        self.insert(value)
    }

    /// Removes and returns the top value
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete_min(&mut self) -> Result<V, HeapError> {
        self.delete_at(self.root)
    }

    /// Removes and returns the top value, or `None` if the heap is empty
    pub fn pop(&mut self) -> Option<V> {
        self.delete_min().ok()
    }

    /// Removes the top value of the sub-heap held by `handle`
    ///
    /// The handle keeps its identity: its slot is overwritten with the
    /// sub-heap that remains, so its parent sees the change in place.
    ///
    /// `handle` must come from this heap, through [`index`](Self::index),
    /// [`root`](Self::root) or a traversal. Handles are not tied to the heap
    /// that issued them: one taken from another heap may name a live slot here
    /// and remove an unrelated value. Prefer [`delete_value`](Self::delete_value)
    /// when an index is attached.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the handle's slot was released
    /// - [`HeapError::EmptyHeap`] if the handle holds an empty node
    pub fn delete_handle(&mut self, handle: Handle) -> Result<V, HeapError> {
        self.delete_at(handle)
    }

    /// Removes `value` from the heap wherever it sits in the forest
    ///
    /// Dispatches through the index in O(1) to the node holding `value`.
    /// Returns false, doing nothing, if the index has no entry for it.
    pub fn delete_value(&mut self, value: &V) -> bool {
        match self.index.get(value) {
            Some(handle) => self.delete_at(handle).is_ok(),
            None => {
                trace!("delete by value: key not indexed");
                false
            }
        }
    }

    /// Inserts every value of `values`, returning the heap for chaining
    pub fn extend_from<T>(&mut self, values: T) -> &mut Self
    where
        T: IntoIterator<Item = V>,
    {
        for value in values {
            self.insert(value);
        }
        self
    }

    /// Returns a destructive iterator yielding values in heap order
    ///
    /// Every value yielded is removed from the heap (and the index). Dropping
    /// the iterator early still removes the remaining values in heap order,
    /// leaving the heap empty.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, V, C, I> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its values in heap order
    pub fn into_sorted_vec(mut self) -> Vec<V> {
        let mut sorted = Vec::with_capacity(self.len);
        sorted.extend(self.drain_sorted());
        sorted
    }

    /// Moves every value of `other` into this heap
    ///
    /// `other`'s forest is grafted into this arena with fresh handles and
    /// melded under the current root; every grafted value is unregistered
    /// from `other`'s index and registered in this one. Both heaps must use
    /// the same ordering.
    ///
    /// # Time Complexity
    /// O(m) where m is the size of `other`
    pub fn append<J>(&mut self, mut other: PairingHeap<V, C, J>)
    where
        J: HandleIndex<V>,
    {
        let other_root = other.root;
        let mut remap: SecondaryMap<Handle, Handle> = SecondaryMap::new();
        let mut pending = vec![other_root];
        let mut moved = Vec::new();

        while let Some(old) = pending.pop() {
            let Some(node) = other.forest.remove(old) else {
                continue;
            };
            if let Some(value) = node.value() {
                other.unregister(value);
            }
            pending.extend(node.children().iter().copied());
            let new = self.forest.insert(HeapNode::Empty);
            remap.insert(old, new);
            moved.push((new, node));
        }

        for (new, mut node) in moved {
            if let HeapNode::Populated { children, .. } = &mut node {
                *children = children
                    .iter()
                    .filter_map(|child| remap.get(*child).copied())
                    .collect();
            }
            self.forest.replace(new, node);
            self.register(new);
        }

        if let Some(grafted) = remap.get(other_root).copied() {
            trace!(grafted = other.len, "appending heap");
            self.root = self.meld(self.root, grafted);
            self.len += other.len;
        }
        other.len = 0;
    }

    /// Removes every value, unregistering each from the index
    pub fn clear(&mut self) {
        let Self {
            forest,
            index,
            hook,
            ..
        } = self;
        for node in forest.drain() {
            if let HeapNode::Populated { value, .. } = node {
                if let Some(hook) = hook.as_mut() {
                    hook(&SyncEvent::Unregistered { key: &value });
                }
                index.remove(&value);
            }
        }
        self.root = self.forest.insert(HeapNode::Empty);
        self.len = 0;
    }

    /// Melds the sub-heaps held by `receiver` and `argument`
    ///
    /// `argument` wins only if its value strictly precedes the receiver's;
    /// the loser's handle is appended to the winner's children. An empty
    /// operand is the identity and its slot is released. The winner's top
    /// value is re-registered in the index.
    fn meld(&mut self, receiver: Handle, argument: Handle) -> Handle {
        let winner = match (self.value(receiver), self.value(argument)) {
            (_, None) => {
                self.forest.remove(argument);
                receiver
            }
            (None, Some(_)) => {
                self.forest.remove(receiver);
                argument
            }
            (Some(r), Some(g)) => {
                let (winner, loser) = if self.ordering.precedes(g, r) {
                    (argument, receiver)
                } else {
                    (receiver, argument)
                };
                self.release_trailing_empties(winner);
                if let Some(HeapNode::Populated { children, .. }) = self.forest.get_mut(winner) {
                    children.push(loser);
                }
                winner
            }
        };
        self.register(winner);
        winner
    }

    /// Pops emptied handles off the tail of `parent`'s children, releasing their slots
    ///
    /// An emptied handle is unregistered and referenced only by its parent,
    /// so each one is released at most once.
    fn release_trailing_empties(&mut self, parent: Handle) {
        loop {
            let Some(&last) = self.forest.get(parent).and_then(|node| node.children().last())
            else {
                return;
            };
            if !self.forest.get(last).is_some_and(HeapNode::is_empty) {
                return;
            }
            self.forest.remove(last);
            if let Some(HeapNode::Populated { children, .. }) = self.forest.get_mut(parent) {
                children.pop();
            }
        }
    }

    /// Combines the children of a deleted node into a single sub-heap
    ///
    /// Pairs are taken from the tail of the list: the last two children are
    /// melded (the last one receiving), the result is collected, and so on
    /// until at most one child remains, which is collected as is. The
    /// collected sub-heaps are then folded front to back, each one receiving
    /// the running result.
    fn pair_children(&mut self, mut children: Children) -> Option<Handle> {
        let mut paired: SmallVec<[Handle; 4]> = SmallVec::with_capacity(children.len() / 2 + 1);
        while let Some(last) = children.pop() {
            match children.pop() {
                Some(previous) => {
                    let melded = self.meld(last, previous);
                    paired.push(melded);
                }
                None => paired.push(last),
            }
        }

        paired.into_iter().fold(None, |acc, next| {
            Some(match acc {
                None => next,
                Some(acc) => self.meld(next, acc),
            })
        })
    }

    /// Deletes the top of `handle`'s node and rebinds the slot in place
    fn delete_at(&mut self, handle: Handle) -> Result<V, HeapError> {
        let node = self.forest.take(handle).ok_or(HeapError::InvalidHandle)?;
        let (value, children) = match node {
            HeapNode::Empty => return Err(HeapError::EmptyHeap),
            HeapNode::Populated { value, children } => (value, children),
        };
        self.unregister(&value);
        trace!(?handle, children = children.len(), "delete top value");

        if let Some(survivor) = self.pair_children(children) {
            if let Some(node) = self.forest.remove(survivor) {
                self.forest.replace(handle, node);
            }
            self.register(handle);
        }
        self.len -= 1;
        Ok(value)
    }

    /// Surfaces the top value of `handle` in the index
    fn register(&mut self, handle: Handle) {
        if !I::TRACKS && self.hook.is_none() {
            return;
        }
        let Some(key) = self.forest.get(handle).and_then(HeapNode::value) else {
            return;
        };
        trace!(?handle, "register surfaced value");
        if let Some(hook) = self.hook.as_mut() {
            hook(&SyncEvent::Registered { key, handle });
        }
        self.index.insert(key, handle);
    }

    fn unregister(&mut self, key: &V) {
        trace!("unregister deleted value");
        if let Some(hook) = self.hook.as_mut() {
            hook(&SyncEvent::Unregistered { key });
        }
        self.index.remove(key);
    }
}

impl<V, C: Default, I: Default> Default for PairingHeap<V, C, I> {
    fn default() -> Self {
        Self::with_ordering_and_index(C::default(), I::default())
    }
}

impl<V, C, I> fmt::Debug for PairingHeap<V, C, I>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingHeap")
            .field("len", &self.len)
            .field("min", &self.find_min())
            .finish_non_exhaustive()
    }
}

impl<V, C, I> Extend<V> for PairingHeap<V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        self.extend_from(iter);
    }
}

impl<V: Ord> FromIterator<V> for PairingHeap<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let mut heap = PairingHeap::new();
        heap.extend_from(iter);
        heap
    }
}

/// Destructive, heap-ordered iterator over a [`PairingHeap`]
///
/// Created by [`PairingHeap::drain_sorted`]. Values left when it is dropped
/// are removed as well.
pub struct DrainSorted<'a, V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
    heap: &'a mut PairingHeap<V, C, I>,
}

impl<V, C, I> Drop for DrainSorted<'_, V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
    /// Removes the remaining values in heap order
    fn drop(&mut self) {
        struct DropGuard<'r, 'a, V, C, I>(&'r mut DrainSorted<'a, V, C, I>)
        where
            C: Precedes<V>,
            I: HandleIndex<V>;

        impl<'r, 'a, V, C, I> Drop for DropGuard<'r, 'a, V, C, I>
        where
            C: Precedes<V>,
            I: HandleIndex<V>,
        {
            fn drop(&mut self) {
                while self.0.heap.pop().is_some() {}
            }
        }

        while let Some(value) = self.heap.pop() {
            let guard = DropGuard(self);
            drop(value);
            mem::forget(guard);
        }
    }
}

impl<V, C, I> Iterator for DrainSorted<'_, V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<V, C, I> ExactSizeIterator for DrainSorted<'_, V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
}

impl<V, C, I> FusedIterator for DrainSorted<'_, V, C, I>
where
    C: Precedes<V>,
    I: HandleIndex<V>,
{
}
