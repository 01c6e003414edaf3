//! Composable Pairing Heap for Rust
//!
//! This crate provides a pairing heap that can be composed with an external
//! index, so that besides the usual priority-queue operations it can delete
//! any previously inserted value in O(1) dispatch plus a local delete-min.
//!
//! # Features
//!
//! - **Pairing heap**: O(1) insert, find-min and meld; O(log n) amortized delete-min
//! - **Handle sharing**: nodes live in an arena; a parent's children list and
//!   the index both hold the same [`Handle`], and mutation happens in place
//! - **Pluggable index**: any [`HandleIndex`]; [`HashIndex`] is provided
//! - **Custom ordering**: any [`Precedes`] predicate, including closures
//! - **Observability**: `tracing` events plus an explicit per-heap sync hook
//!
//! # Example
//!
//! ```rust
//! use composable_pairing_heap::{HashIndex, PairingHeap};
//!
//! let mut heap = PairingHeap::with_index(HashIndex::default());
//! heap.extend_from([5, 2, 7, 4, 6, 3]);
//! assert_eq!(heap.find_min(), Some(&2));
//!
//! // Delete values wherever they sit in the forest
//! heap.delete_value(&2);
//! heap.delete_value(&5);
//! assert_eq!(heap.into_sorted_vec(), vec![3, 4, 6, 7]);
//! ```

pub mod index;
pub mod pairing;
pub mod stdlib_compat;
pub mod storage;
pub mod traits;
pub mod traverse;

// Re-export the main types for convenience
pub use index::HashIndex;
pub use pairing::{DrainSorted, PairingHeap, SyncEvent};
pub use stdlib_compat::{heap_sort, heap_sort_by};
pub use storage::{Handle, HeapNode};
pub use traits::{Greater, HandleIndex, HeapError, Less, NoIndex, Precedes};
pub use traverse::{Step, Traverse};
