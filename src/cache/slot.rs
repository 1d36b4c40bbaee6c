use serde::{Deserialize, Serialize};

/// Which of the two edge weights a cached route was optimised for.
///
/// Only the pure weight dimensions are cached: a blend factor of `0.0` routes
/// purely on the first weight, `1.0` purely on the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightMode {
    Primary,
    Secondary,
}

impl WeightMode {
    /// Maps a blend factor onto a cacheable mode, if it is one of the two
    /// pure dimensions.
    pub fn from_alpha(alpha: f32) -> Option<Self> {
        if alpha == 0.0 {
            Some(WeightMode::Primary)
        } else if alpha == 1.0 {
            Some(WeightMode::Secondary)
        } else {
            None
        }
    }

    pub fn alpha(self) -> f32 {
        match self {
            WeightMode::Primary => 0.0,
            WeightMode::Secondary => 1.0,
        }
    }

    /// Hash contribution of the mode, `1 - alpha`: routes on the first
    /// weight hash with flag 1.
    pub fn flag(self) -> u64 {
        match self {
            WeightMode::Primary => 1,
            WeightMode::Secondary => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub start: usize,
    pub end: usize,
    pub mode: WeightMode,
}

impl CacheKey {
    pub fn new(start: usize, end: usize, mode: WeightMode) -> Self {
        CacheKey { start, end, mode }
    }
}

/// A stored sequence together with its key and usage counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub sequence: Vec<usize>,
    pub usage: u64,
}

/// State of one table slot.
///
/// `Tombstone` marks a slot whose entry was removed. Lookups must probe past
/// it, inserts may reuse it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CacheSlot {
    #[default]
    Empty,
    Tombstone,
    Occupied(CacheEntry),
}

impl CacheSlot {
    pub fn entry(&self) -> Option<&CacheEntry> {
        match self {
            CacheSlot::Occupied(entry) => Some(entry),
            CacheSlot::Empty | CacheSlot::Tombstone => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, CacheSlot::Occupied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pure_blends_are_cacheable() {
        assert_eq!(WeightMode::from_alpha(0.0), Some(WeightMode::Primary));
        assert_eq!(WeightMode::from_alpha(1.0), Some(WeightMode::Secondary));
        assert_eq!(WeightMode::from_alpha(0.5), None);
        assert_eq!(WeightMode::Secondary.alpha(), 1.0);
    }

    #[test]
    fn flag_is_one_minus_alpha() {
        for mode in [WeightMode::Primary, WeightMode::Secondary] {
            assert_eq!(mode.flag() as f32, 1.0 - mode.alpha());
        }
        assert_eq!(WeightMode::Primary.flag(), 1);
    }

    #[test]
    fn slot_states() {
        let entry = CacheEntry {
            key: CacheKey::new(0, 2, WeightMode::Primary),
            sequence: vec![0, 1, 2],
            usage: 1,
        };
        let slot = CacheSlot::Occupied(entry.clone());

        assert!(slot.is_occupied());
        assert_eq!(slot.entry(), Some(&entry));
        assert_eq!(CacheSlot::default(), CacheSlot::Empty);
        assert!(CacheSlot::Tombstone.entry().is_none());
    }
}
