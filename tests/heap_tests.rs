//! Generic tests for the heap façade
//!
//! Every test runs against both an unindexed heap and one composed with a
//! `HashIndex`: composing an index must never change observable heap order.

use composable_pairing_heap::{HandleIndex, HashIndex, HeapError, Less, NoIndex, PairingHeap};

type Heap<V, I> = PairingHeap<V, Less, I>;

/// Test that empty heap behaves correctly
fn test_empty_heap<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.find_min(), None);
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.delete_min(), Err(HeapError::EmptyHeap));
    assert_eq!(heap.pop(), None);
    assert!(heap.is_empty());
}

/// Test basic insert and delete-min operations
fn test_basic_operations<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();

    heap.insert(5);
    heap.insert(1);
    heap.insert(10);
    heap.insert(3);

    assert!(!heap.is_empty());
    assert_eq!(heap.len(), 4);
    assert_eq!(heap.find_min(), Some(&1));

    assert_eq!(heap.delete_min(), Ok(1));
    assert_eq!(heap.delete_min(), Ok(3));
    assert_eq!(heap.delete_min(), Ok(5));
    assert_eq!(heap.delete_min(), Ok(10));
    assert_eq!(heap.delete_min(), Err(HeapError::EmptyHeap));
    assert!(heap.is_empty());
}

/// Test that find-min is idempotent
fn test_peek_idempotent<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    heap.extend_from([8, 4, 6]);
    for _ in 0..5 {
        assert_eq!(heap.find_min(), Some(&4));
    }
    assert_eq!(heap.len(), 3);
}

/// Test the state machine: Empty -> NonEmpty -> Empty -> NonEmpty
fn test_empty_nonempty_cycle<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    for round in 0..3 {
        assert!(heap.is_empty());
        heap.insert(round);
        heap.insert(round + 10);
        assert!(!heap.is_empty());
        assert_eq!(heap.pop(), Some(round));
        assert_eq!(heap.pop(), Some(round + 10));
    }
    assert!(heap.is_empty());
}

/// Test that extend_from chains and drains in ascending order
fn test_from_to_sequence<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    let drained = heap
        .extend_from([9, -3, 4, 0, 12, 7])
        .drain_sorted()
        .collect::<Vec<_>>();
    assert_eq!(drained, vec![-3, 0, 4, 7, 9, 12]);
    assert!(heap.is_empty());
}

/// Test ascending insertion
fn test_ascending_insertion<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    heap.extend_from(0..100);
    assert_eq!(heap.into_sorted_vec(), (0..100).collect::<Vec<_>>());
}

/// Test descending insertion
fn test_descending_insertion<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    heap.extend_from((0..100).rev());
    assert_eq!(heap.find_min(), Some(&0));
    assert_eq!(heap.into_sorted_vec(), (0..100).collect::<Vec<_>>());
}

/// Test interleaved insert and delete-min
fn test_alternating_operations<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    let mut model = Vec::new();

    for i in 0..200 {
        let value = (i * 37) % 101;
        heap.insert(value);
        model.push(value);
        if i % 3 == 2 {
            model.sort_unstable();
            let expected = model.remove(0);
            assert_eq!(heap.pop(), Some(expected));
        }
        assert_eq!(heap.len(), model.len());
    }

    model.sort_unstable();
    assert_eq!(heap.into_sorted_vec(), model);
}

/// Test negative values
fn test_negative_values<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    heap.extend_from([-5, 3, -100, 0, i32::MIN, i32::MAX]);
    assert_eq!(heap.pop(), Some(i32::MIN));
    assert_eq!(heap.pop(), Some(-100));
    assert_eq!(heap.pop(), Some(-5));
}

/// Test heap property through a sequence of deletions
fn test_heap_property<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    heap.extend_from([50, 20, 80, 10, 30, 70, 90, 60, 40]);

    let mut last = i32::MIN;
    while let Some(value) = heap.pop() {
        assert!(value >= last);
        last = value;
        assert_eq!(heap.verify(), Ok(()));
    }
}

/// Test that append keeps order
fn test_append<I: HandleIndex<i32> + Default>() {
    let mut left = Heap::<i32, I>::default();
    let mut right = Heap::<i32, I>::default();
    left.extend_from((0..50).map(|i| i * 2));
    right.extend_from((0..50).map(|i| i * 2 + 1));

    left.append(right);
    assert_eq!(left.len(), 100);
    assert_eq!(left.verify(), Ok(()));
    assert_eq!(left.into_sorted_vec(), (0..100).collect::<Vec<_>>());
}

/// Test the iterator over unsorted values
fn test_iter_visits_all<I: HandleIndex<i32> + Default>() {
    let mut heap = Heap::<i32, I>::default();
    heap.extend_from([3, 1, 4, 1, 5, 9, 2, 6]);

    let mut seen: Vec<i32> = heap.iter().copied().collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 1, 2, 3, 4, 5, 6, 9]);
    assert_eq!(heap.iter().next(), Some(&1));
}

macro_rules! heap_test {
    ($name:ident, $index:ty, $func:ident) => {
        #[test]
        fn $name() {
            $func::<$index>();
        }
    };
}

macro_rules! define_heap_tests {
    ($index:ty, $($name:ident => $func:ident),* $(,)?) => {
        $(heap_test!($name, $index, $func);)*
    };
}

define_heap_tests!(
    NoIndex,
    test_plain_empty => test_empty_heap,
    test_plain_basic => test_basic_operations,
    test_plain_peek_idempotent => test_peek_idempotent,
    test_plain_empty_cycle => test_empty_nonempty_cycle,
    test_plain_from_to_sequence => test_from_to_sequence,
    test_plain_ascending => test_ascending_insertion,
    test_plain_descending => test_descending_insertion,
    test_plain_alternating => test_alternating_operations,
    test_plain_negative => test_negative_values,
    test_plain_heap_property => test_heap_property,
    test_plain_append => test_append,
    test_plain_iter => test_iter_visits_all,
);

define_heap_tests!(
    HashIndex<i32>,
    test_indexed_empty => test_empty_heap,
    test_indexed_basic => test_basic_operations,
    test_indexed_peek_idempotent => test_peek_idempotent,
    test_indexed_empty_cycle => test_empty_nonempty_cycle,
    test_indexed_from_to_sequence => test_from_to_sequence,
    test_indexed_ascending => test_ascending_insertion,
    test_indexed_descending => test_descending_insertion,
    test_indexed_alternating => test_alternating_operations,
    test_indexed_negative => test_negative_values,
    test_indexed_heap_property => test_heap_property,
    test_indexed_append => test_append,
);

#[test]
fn test_concrete_scenario() {
    let mut heap = PairingHeap::with_index(HashIndex::default());
    for x in [5, 2, 7, 4, 6, 3] {
        heap.insert(x);
    }
    assert!(heap.delete_value(&2));
    assert!(heap.delete_value(&5));
    assert_eq!(heap.into_sorted_vec(), vec![3, 4, 6, 7]);
}

#[test]
fn test_heap_sort_functions() {
    use composable_pairing_heap::{heap_sort, heap_sort_by, Greater};

    let xs = vec![12, -4, 7, 7, 0, 3];
    let mut sorted = xs.clone();
    sorted.sort();
    assert_eq!(heap_sort(xs.clone()), sorted);

    sorted.reverse();
    assert_eq!(heap_sort_by(xs, Greater), sorted);
}

#[test]
fn test_borrowed_index_outlives_heap() {
    let mut index = HashIndex::new();
    {
        let mut heap = PairingHeap::with_index(&mut index);
        heap.extend_from([30, 10, 20]);
        assert!(heap.delete_value(&20));
    }
    assert_eq!(index.len(), 2);
    assert!(index.contains(&10));
    assert!(index.contains(&30));
    assert!(!index.contains(&20));
}

#[test]
fn test_string_values() {
    let mut heap = PairingHeap::with_index(HashIndex::default());
    for word in ["pear", "apple", "fig", "banana"] {
        heap.insert(word.to_string());
    }
    assert!(heap.delete_value(&"fig".to_string()));
    assert_eq!(
        heap.into_sorted_vec(),
        vec!["apple".to_string(), "banana".to_string(), "pear".to_string()]
    );
}

#[test]
fn test_duplicates_last_registration_wins() {
    let mut heap = PairingHeap::with_index(HashIndex::default());
    heap.extend_from([1, 4, 4, 9]);

    // Only one binding survives for the duplicated key
    assert_eq!(heap.index().len(), 3);

    assert!(heap.delete_value(&4));
    assert_eq!(heap.len(), 3);
    // The other copy is still in the heap but no longer indexed
    assert!(!heap.delete_value(&4));
    assert_eq!(heap.into_sorted_vec(), vec![1, 4, 9]);
}
