use std::cmp::Ordering;

/// A payload tagged with the priority it should be popped by.
///
/// Pairs are ordered by `key` only. Two pairs with the same key compare equal
/// regardless of their payloads, so heaps make no promise about the relative
/// order of equal-key pairs.
#[derive(Copy, Clone, Debug)]
pub struct PriorityPair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> PriorityPair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        PriorityPair { key, value }
    }
}

impl<K: Ord, V> PartialEq for PriorityPair<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for PriorityPair<K, V> {}

impl<K: Ord, V> PartialOrd for PriorityPair<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for PriorityPair<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
