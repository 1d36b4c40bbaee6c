use std::{cmp::Ordering, collections::BinaryHeap};

use crate::candidates::PriorityPair;

/// Heap entry whose ordering direction is fixed at compile time.
struct Directed<K, V, const MAX_FIRST: bool>(PriorityPair<K, V>);

impl<K: Ord, V, const MAX_FIRST: bool> PartialEq for Directed<K, V, MAX_FIRST> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K: Ord, V, const MAX_FIRST: bool> Eq for Directed<K, V, MAX_FIRST> {}

impl<K: Ord, V, const MAX_FIRST: bool> PartialOrd for Directed<K, V, MAX_FIRST> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V, const MAX_FIRST: bool> Ord for Directed<K, V, MAX_FIRST> {
    fn cmp(&self, other: &Self) -> Ordering {
        if MAX_FIRST {
            self.0.cmp(&other.0)
        } else {
            other.0.cmp(&self.0)
        }
    }
}

/// A binary heap of (priority, payload) pairs.
///
/// With `MAX_FIRST = true` the pair with the largest key is popped first, with
/// `MAX_FIRST = false` the smallest. Use the [`MaxPairHeap`] and
/// [`MinPairHeap`] aliases rather than spelling out the flag.
///
/// Duplicates are allowed: pushing the same payload twice keeps both entries.
/// Graph traversal relies on this to implement decrease-key by reinsertion.
///
/// # Time Complexity
/// - `push` / `pop`: O(log n)
/// - `peek`, `len`: O(1)
pub struct PairHeap<K, V, const MAX_FIRST: bool> {
    heap: BinaryHeap<Directed<K, V, MAX_FIRST>>,
}

pub type MaxPairHeap<K, V> = PairHeap<K, V, true>;
pub type MinPairHeap<K, V> = PairHeap<K, V, false>;

impl<K: Ord, V, const MAX_FIRST: bool> PairHeap<K, V, MAX_FIRST> {
    pub fn new() -> Self {
        PairHeap {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PairHeap {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: K, value: V) {
        self.heap.push(Directed(PriorityPair { key, value }));
    }

    /// Removes and returns the highest-priority pair, if any.
    pub fn pop(&mut self) -> Option<PriorityPair<K, V>> {
        self.heap.pop().map(|entry| entry.0)
    }

    pub fn peek(&self) -> Option<&PriorityPair<K, V>> {
        self.heap.peek().map(|entry| &entry.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Empties the heap, yielding pairs in priority order.
    pub fn drain_ordered(&mut self) -> impl Iterator<Item = PriorityPair<K, V>> + '_ {
        std::iter::from_fn(move || self.pop())
    }
}

impl<K: Ord, V, const MAX_FIRST: bool> Default for PairHeap<K, V, MAX_FIRST> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V, const MAX_FIRST: bool> FromIterator<(K, V)> for PairHeap<K, V, MAX_FIRST> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PairHeap {
            heap: iter
                .into_iter()
                .map(|(key, value)| Directed(PriorityPair { key, value }))
                .collect(),
        }
    }
}
