use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::{
    cache::{CacheConfig, CacheEntry, CacheError, CacheKey, CacheSlot, WeightMode},
    candidates::MaxPairHeap,
};

/// Slot indices visited for one key: `(home + i²) mod capacity` for
/// `i = 0, 1, 2, …`, stopping after `capacity` probes.
struct ProbeSequence {
    home: u64,
    step: u64,
    capacity: u64,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let offset = self.step.wrapping_mul(self.step);
        self.step += 1;
        Some((self.home.wrapping_add(offset) % self.capacity) as usize)
    }
}

/// Open-addressing cache of integer sequences with usage counting.
///
/// Sequences are keyed by their first element, their last element and a
/// [`WeightMode`]. The table is allocated once with `capacity` slots and never
/// resized; once more than `capacity / 2` slots are occupied further inserts
/// fail with [`CacheError::CacheFull`] until the caller evicts something.
///
/// # Invariants
/// - At most one `Occupied` slot holds a given key.
/// - `occupied` equals the number of `Occupied` slots.
/// - Removed entries leave a `Tombstone`, never `Empty`, so keys probed past
///   them remain reachable.
///
/// Sequences are copied in and out: callers never alias stored data.
pub struct PathCache {
    slots: Box<[CacheSlot]>,
    occupied: usize,
    primes: [u64; 3],
}

impl PathCache {
    /// Creates an empty cache.
    ///
    /// # Panics
    /// Panics if `config.capacity == 0`
    pub fn new(config: CacheConfig) -> Self {
        assert!(config.capacity > 0);
        PathCache {
            slots: vec![CacheSlot::Empty; config.capacity].into_boxed_slice(),
            occupied: 0,
            primes: config.primes,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheConfig::with_capacity(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied-count above which inserts are refused.
    pub fn threshold(&self) -> usize {
        self.capacity() / 2
    }

    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn slots(&self) -> &[CacheSlot] {
        &self.slots
    }

    fn hash(&self, key: &CacheKey) -> u64 {
        let [p0, p1, p2] = self.primes;
        (key.start as u64)
            .wrapping_mul(p0)
            .wrapping_add((key.end as u64).wrapping_mul(p1))
            .wrapping_add(key.mode.flag().wrapping_mul(p2))
    }

    fn probe(&self, key: &CacheKey) -> ProbeSequence {
        ProbeSequence {
            home: self.hash(key),
            step: 0,
            capacity: self.capacity() as u64,
        }
    }

    /// Index of the occupied slot holding `key`. Tombstones are skipped, the
    /// first empty slot ends the search.
    fn locate(&self, key: &CacheKey) -> Option<usize> {
        for index in self.probe(key) {
            match &self.slots[index] {
                CacheSlot::Empty => return None,
                CacheSlot::Occupied(entry) if entry.key == *key => return Some(index),
                CacheSlot::Occupied(_) | CacheSlot::Tombstone => {}
            }
        }
        None
    }

    /// Stores `sequence` under the key formed by its first and last elements.
    ///
    /// # Returns
    /// - `Ok(0)` if the key was new and the sequence was stored.
    /// - `Ok(n)` with `n > 0` if the key was already cached: its usage counter
    ///   is incremented and `n` is the value it held before. The stored
    ///   sequence is left untouched.
    ///
    /// # Errors
    /// - [`CacheError::EmptySequence`] if `sequence` is empty.
    /// - [`CacheError::CacheFull`] if more than `capacity / 2` slots are
    ///   already occupied. Nothing is modified in that case.
    pub fn insert(&mut self, sequence: &[usize], mode: WeightMode) -> Result<u64, CacheError> {
        let (Some(&start), Some(&end)) = (sequence.first(), sequence.last()) else {
            return Err(CacheError::EmptySequence);
        };
        if self.occupied > self.threshold() {
            return Err(CacheError::CacheFull(self.occupied));
        }

        let key = CacheKey::new(start, end, mode);
        let mut vacancy = None;
        for index in self.probe(&key) {
            match &mut self.slots[index] {
                CacheSlot::Occupied(entry) if entry.key == key => {
                    let prior = entry.usage;
                    entry.usage += 1;
                    trace!(slot = index, usage = entry.usage, "refreshed cached sequence");
                    return Ok(prior);
                }
                CacheSlot::Occupied(_) => {}
                // reusable, but the key may still sit further down the chain
                CacheSlot::Tombstone => {
                    vacancy.get_or_insert(index);
                }
                CacheSlot::Empty => {
                    vacancy.get_or_insert(index);
                    break;
                }
            }
        }

        let Some(index) = vacancy else {
            return Err(CacheError::CacheFull(self.occupied));
        };
        self.slots[index] = CacheSlot::Occupied(CacheEntry {
            key,
            sequence: sequence.to_vec(),
            usage: 1,
        });
        self.occupied += 1;
        debug!(slot = index, start, end, ?mode, "cached new sequence");
        Ok(0)
    }

    /// Copies out the sequence stored for (`start`, `end`, `mode`).
    ///
    /// When `bump_usage` is set a hit also increments the entry's usage
    /// counter.
    pub fn find(
        &mut self,
        start: usize,
        end: usize,
        mode: WeightMode,
        bump_usage: bool,
    ) -> Option<Vec<usize>> {
        let index = self.locate(&CacheKey::new(start, end, mode))?;
        let CacheSlot::Occupied(entry) = &mut self.slots[index] else {
            return None;
        };
        if bump_usage {
            entry.usage += 1;
        }
        Some(entry.sequence.clone())
    }

    /// Read-only view of the entry stored for (`start`, `end`, `mode`).
    pub fn peek(&self, start: usize, end: usize, mode: WeightMode) -> Option<&CacheEntry> {
        let index = self.locate(&CacheKey::new(start, end, mode))?;
        self.slots[index].entry()
    }

    /// Removes the entry for (`start`, `end`, `mode`), returning its sequence.
    /// Absent keys are a no-op.
    pub fn remove(&mut self, start: usize, end: usize, mode: WeightMode) -> Option<Vec<usize>> {
        let index = self.locate(&CacheKey::new(start, end, mode))?;
        self.take_slot(index).map(|entry| entry.sequence)
    }

    fn take_slot(&mut self, index: usize) -> Option<CacheEntry> {
        match std::mem::take(&mut self.slots[index]) {
            CacheSlot::Occupied(entry) => {
                self.slots[index] = CacheSlot::Tombstone;
                self.occupied -= 1;
                debug!(
                    slot = index,
                    start = entry.key.start,
                    end = entry.key.end,
                    "removed cached sequence"
                );
                Some(entry)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Evicts up to `count` entries, each time the one with the smallest usage
    /// counter (the first in table order on ties).
    ///
    /// Every eviction is a full table scan, so this costs O(count · capacity).
    ///
    /// # Returns
    /// The number of entries actually removed, which is smaller than `count`
    /// only if the cache ran empty.
    pub fn remove_least_used(&mut self, count: usize) -> usize {
        let mut removed = 0;
        for _ in 0..count {
            let victim = self
                .slots
                .iter()
                .enumerate()
                .filter_map(|(index, slot)| slot.entry().map(|entry| (index, entry.usage)))
                .min_by_key(|&(_, usage)| usage)
                .map(|(index, _)| index);

            let Some(index) = victim else {
                break;
            };
            if self.take_slot(index).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Marks every slot empty, discarding all entries and usage history.
    pub fn reset(&mut self) {
        self.slots.fill(CacheSlot::Empty);
        self.occupied = 0;
        debug!(capacity = self.capacity(), "cache reset");
    }

    /// Sequence of the entry with the strictly largest usage counter. The first
    /// such entry in table order wins ties.
    pub fn most_used(&self) -> Option<Vec<usize>> {
        self.slots
            .iter()
            .filter_map(CacheSlot::entry)
            .min_by_key(|entry| Reverse(entry.usage))
            .map(|entry| entry.sequence.clone())
    }

    /// Occupied slots as `(slot index, entry)`, most used first.
    pub fn entries_by_usage(&self) -> Vec<(usize, &CacheEntry)> {
        let mut heap: MaxPairHeap<u64, usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.entry().map(|entry| (entry.usage, index)))
            .collect();

        heap.drain_ordered()
            .filter_map(|pair| self.slots[pair.value].entry().map(|entry| (pair.value, entry)))
            .collect()
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
