//! Standard library compatibility layer
//!
//! Aliases for the common heap configurations and free sorting functions.
//!
//! # Differences from BinaryHeap
//!
//! - **Min-heap vs Max-heap**: [`MinHeap`] pops the smallest value first,
//!   while `BinaryHeap` is a max-heap. Use [`MaxHeap`] for `BinaryHeap` order.
//!
//! # Example
//!
//! ```rust
//! use composable_pairing_heap::stdlib_compat::{heap_sort, MaxHeap};
//!
//! assert_eq!(heap_sort([5, 3, 7]), vec![3, 5, 7]);
//!
//! let mut heap = MaxHeap::default();
//! heap.push(5);
//! heap.push(3);
//! heap.push(7);
//! assert_eq!(heap.peek(), Some(&7));
//! assert_eq!(heap.pop(), Some(7));
//! ```

use crate::index::HashIndex;
use crate::pairing::PairingHeap;
use crate::traits::{Greater, Less, NoIndex, Precedes};

/// Min-heap with natural ordering and no index
pub type MinHeap<V> = PairingHeap<V, Less, NoIndex>;

/// Max-heap with natural ordering and no index
pub type MaxHeap<V> = PairingHeap<V, Greater, NoIndex>;

/// Min-heap composed with a [`HashIndex`], supporting delete-by-value
pub type IndexedHeap<V> = PairingHeap<V, Less, HashIndex<V>>;

/// Sorts `values` ascending by draining a pairing heap
pub fn heap_sort<V, T>(values: T) -> Vec<V>
where
    V: Ord,
    T: IntoIterator<Item = V>,
{
    heap_sort_by(values, Less)
}

/// Sorts `values` so that each element is not preceded by a later one under `ordering`
pub fn heap_sort_by<V, T, C>(values: T, ordering: C) -> Vec<V>
where
    T: IntoIterator<Item = V>,
    C: Precedes<V>,
{
    let mut heap = PairingHeap::with_ordering(ordering);
    heap.extend_from(values);
    heap.into_sorted_vec()
}
