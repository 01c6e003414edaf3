//! Arena storage for heap nodes
//!
//! Every heap node lives in a slot of a [`SlotMap`]. The slot's generational
//! key is the [`Handle`]: the unit of sharing between a parent's children list
//! and the external index. Both places store the key, never the node, so
//! overwriting the slot is observed through every reference at once.
//!
//! # Design
//!
//! - A slot is written in place by [`Forest::replace`] and [`Forest::get_mut`].
//! - Keys are generational, so a handle whose slot was released reads back as
//!   `None` instead of aliasing a newer node.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Shared, in-place mutable cell holding one heap node
    ///
    /// A handle is `Copy`; copies name the same slot. It stays valid until the
    /// heap releases its slot, after which every accessor reports it as stale.
    pub struct Handle;
}

/// Children of a populated node, in merge order
pub type Children = SmallVec<[Handle; 4]>;

/// A heap node: empty, or a value with its child sub-heaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapNode<V> {
    /// No payload; the identity element of melding
    Empty,
    /// A value and the handles of its child sub-heaps
    Populated {
        /// The top value of this sub-heap
        value: V,
        /// Child sub-heaps, each satisfying the heap property on its own
        children: Children,
    },
}

impl<V> HeapNode<V> {
    /// Creates a populated node with no children
    #[inline]
    pub fn singleton(value: V) -> Self {
        HeapNode::Populated {
            value,
            children: Children::new(),
        }
    }

    /// Returns true for the `Empty` variant
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, HeapNode::Empty)
    }

    /// Returns the top value, if populated
    #[inline]
    pub fn value(&self) -> Option<&V> {
        match self {
            HeapNode::Empty => None,
            HeapNode::Populated { value, .. } => Some(value),
        }
    }

    /// Returns the child handles (empty for an `Empty` node)
    #[inline]
    pub fn children(&self) -> &[Handle] {
        match self {
            HeapNode::Empty => &[],
            HeapNode::Populated { children, .. } => children,
        }
    }
}

impl<V> Default for HeapNode<V> {
    fn default() -> Self {
        HeapNode::Empty
    }
}

/// Slot arena owning every node of one heap
#[derive(Debug, Clone)]
pub struct Forest<V> {
    nodes: SlotMap<Handle, HeapNode<V>>,
}

impl<V> Default for Forest<V> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<V> Forest<V> {
    /// Creates an arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Stores a node, returning the handle that names its slot
    #[inline]
    pub fn insert(&mut self, node: HeapNode<V>) -> Handle {
        self.nodes.insert(node)
    }

    /// Releases a slot, returning the node it held
    #[inline]
    pub fn remove(&mut self, handle: Handle) -> Option<HeapNode<V>> {
        self.nodes.remove(handle)
    }

    /// Reads the node in a slot, or `None` for a stale handle
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&HeapNode<V>> {
        self.nodes.get(handle)
    }

    /// Writes the node in a slot in place, or `None` for a stale handle
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut HeapNode<V>> {
        self.nodes.get_mut(handle)
    }

    /// Overwrites the slot in place, returning the previous node
    ///
    /// Returns `None` and leaves the arena untouched if the handle is stale.
    pub fn replace(&mut self, handle: Handle, node: HeapNode<V>) -> Option<HeapNode<V>> {
        self.nodes
            .get_mut(handle)
            .map(|slot| std::mem::replace(slot, node))
    }

    /// Moves the node out of a slot, leaving `Empty` behind
    #[inline]
    pub fn take(&mut self, handle: Handle) -> Option<HeapNode<V>> {
        self.replace(handle, HeapNode::Empty)
    }

    /// Returns true if the handle names a live slot
    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Number of live slots, including emptied ones not yet released
    #[inline]
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Releases every slot, yielding the nodes they held
    pub fn drain(&mut self) -> impl Iterator<Item = HeapNode<V>> + '_ {
        self.nodes.drain().map(|(_, node)| node)
    }
}
