use std::fmt;

use crate::cache::{CacheEntry, CacheSlot, PathCache};

/// Text dump of a [`PathCache`], either in raw table order or most used first.
///
/// ```
/// use skyroute::cache::{PathCache, WeightMode};
///
/// let mut cache = PathCache::with_capacity(3);
/// cache.insert(&[0, 1, 2], WeightMode::Primary).unwrap();
///
/// let dump = cache.dump().to_string();
/// assert!(dump.contains("[000]-/001/->[002]"));
/// ```
pub struct CacheDump<'a> {
    cache: &'a PathCache,
    by_usage: bool,
}

impl PathCache {
    pub fn dump(&self) -> CacheDump<'_> {
        CacheDump {
            cache: self,
            by_usage: false,
        }
    }
}

impl CacheDump<'_> {
    /// Only list occupied slots, most used first.
    pub fn by_usage(self) -> Self {
        CacheDump {
            by_usage: true,
            ..self
        }
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, index: usize, entry: &CacheEntry) -> fmt::Result {
    write!(f, "[{index:03}] - [{:03}] : ({:<9}) ", entry.usage, format!("{:?}", entry.key.mode))?;
    for (position, value) in entry.sequence.iter().enumerate() {
        if position % 2 == 0 {
            write!(f, "[{value:03}]")?;
        } else {
            write!(f, "-/{value:03}/->")?;
        }
    }
    writeln!(f)
}

impl fmt::Display for CacheDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Elements {} / {}", self.cache.len(), self.cache.capacity())?;
        writeln!(f, "[IDX] - [USE] | DATA")?;

        if self.by_usage {
            for (index, entry) in self.cache.entries_by_usage() {
                write_entry(f, index, entry)?;
            }
            return Ok(());
        }

        for (index, slot) in self.cache.slots().iter().enumerate() {
            match slot {
                CacheSlot::Empty => writeln!(f, "[{index:03}]         : EMPTY")?,
                CacheSlot::Tombstone => writeln!(f, "[{index:03}]         : TOMBSTONE")?,
                CacheSlot::Occupied(entry) => write_entry(f, index, entry)?,
            }
        }
        Ok(())
    }
}
