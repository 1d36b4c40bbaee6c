use std::fmt;

/// Counters describing how route queries were answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    cache_hits: usize,
    cache_misses: usize,
    paths_computed: usize,
    evictions: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            cache_hits: 0,
            cache_misses: 0,
            paths_computed: 0,
            evictions: 0,
        }
    }

    /// Record that a route was answered from the cache
    pub fn bump_cache_hits(&mut self) {
        self.cache_hits += 1
    }

    /// Record that a cacheable route was not found in the cache
    pub fn bump_cache_misses(&mut self) {
        self.cache_misses += 1
    }

    /// Record that the path engine ran a shortest-path search
    pub fn bump_paths_computed(&mut self) {
        self.paths_computed += 1
    }

    pub fn bump_evictions(&mut self, amount: usize) {
        self.evictions += amount
    }

    pub fn get_cache_hits(&self) -> usize {
        self.cache_hits
    }

    pub fn get_cache_misses(&self) -> usize {
        self.cache_misses
    }

    pub fn get_paths_computed(&self) -> usize {
        self.paths_computed
    }

    pub fn get_evictions(&self) -> usize {
        self.evictions
    }

    /// Fraction of cacheable lookups served from the cache, `0.0` if none
    /// happened yet.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / lookups as f64
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cache hits: {}, cache misses: {} ({:.2}% hit rate), paths computed: {}, evictions: {}",
            self.cache_hits,
            self.cache_misses,
            self.hit_rate() * 100.0,
            self.paths_computed,
            self.evictions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = Stats::new();
        assert_eq!(stats.get_cache_hits(), 0);
        assert_eq!(stats.get_cache_misses(), 0);
        assert_eq!(stats.get_paths_computed(), 0);
        assert_eq!(stats.get_evictions(), 0);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_bumps_accumulate() {
        let mut stats = Stats::new();
        stats.bump_cache_hits();
        stats.bump_cache_misses();
        stats.bump_cache_misses();
        stats.bump_paths_computed();
        stats.bump_evictions(3);

        assert_eq!(stats.get_cache_hits(), 1);
        assert_eq!(stats.get_cache_misses(), 2);
        assert_eq!(stats.get_paths_computed(), 1);
        assert_eq!(stats.get_evictions(), 3);
    }

    #[test]
    fn test_hit_rate() {
        let mut stats = Stats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.bump_cache_hits();
        stats.bump_cache_misses();
        stats.bump_cache_misses();
        stats.bump_cache_misses();
        assert_eq!(stats.hit_rate(), 0.25);
    }

    #[test]
    fn test_display() {
        let mut stats = Stats::new();
        stats.bump_cache_hits();
        stats.bump_cache_misses();

        assert_eq!(
            stats.to_string(),
            "cache hits: 1, cache misses: 1 (50.00% hit rate), paths computed: 0, evictions: 0"
        );
    }
}
