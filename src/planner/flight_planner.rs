use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    cache::{CacheConfig, CacheDump, CacheError, PathCache, WeightMode},
    graph::{GraphDisplay, GraphError, MultiGraph},
    planner::PlannerError,
    statistics::Stats,
};

/// A flight taken out of the map, kept so it can be resumed with its original
/// weights.
#[derive(Debug, Clone, PartialEq)]
pub struct HaltedFlight {
    pub from: String,
    pub to: String,
    pub airline: String,
    pub weights: [f32; 2],
}

impl HaltedFlight {
    fn matches(&self, from: &str, to: &str, airline: &str) -> bool {
        self.from == from && self.to == to && self.airline == airline
    }
}

/// How a route query was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightOutcome {
    /// Served from the cache.
    Cached { path: Vec<usize>, mode: WeightMode },
    /// Computed on a single weight dimension and stored in the cache.
    Calculated { path: Vec<usize>, mode: WeightMode },
    /// Computed for a blended α, or with exclusions. Never cached.
    Computed { path: Vec<usize> },
    NoPath,
}

impl FlightOutcome {
    pub fn path(&self) -> Option<&[usize]> {
        match self {
            FlightOutcome::Cached { path, .. }
            | FlightOutcome::Calculated { path, .. }
            | FlightOutcome::Computed { path } => Some(path),
            FlightOutcome::NoPath => None,
        }
    }
}

pub struct FlightPlanner {
    map: MultiGraph,
    cache: PathCache,
    halted: Vec<HaltedFlight>,
    stats: Stats,
}

impl FlightPlanner {
    pub fn new(map: MultiGraph, config: CacheConfig) -> Self {
        FlightPlanner {
            map,
            cache: PathCache::new(config),
            halted: Vec::new(),
            stats: Stats::new(),
        }
    }

    pub fn load_from_path(
        map_path: impl AsRef<Path>,
        config: CacheConfig,
    ) -> Result<Self, PlannerError> {
        let config = config.validate()?;
        let map = MultiGraph::load_from_path(map_path)?;
        info!(capacity = config.capacity, "planner ready");
        Ok(Self::new(map, config))
    }

    pub fn map(&self) -> &MultiGraph {
        &self.map
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    pub fn halted_flights(&self) -> &[HaltedFlight] {
        &self.halted
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Cheapest route from `from` to `to` for blend factor `alpha`.
    ///
    /// Routes for `alpha == 0.0` and `alpha == 1.0` go through the cache: a
    /// hit bumps the entry's usage, a miss computes the route and stores it,
    /// evicting the least used entry first if the cache is full. A route that
    /// still finds no free slot on its probe chain is returned as
    /// [`FlightOutcome::Computed`] without being cached. Any other `alpha` is
    /// computed every time.
    ///
    /// # Errors
    /// [`PlannerError::Graph`] if either airport is unknown or `alpha` is NaN.
    pub fn find_flight(
        &mut self,
        from: &str,
        to: &str,
        alpha: f32,
    ) -> Result<FlightOutcome, PlannerError> {
        let start = self.map.vertex_index(from)?;
        let end = self.map.vertex_index(to)?;

        let Some(mode) = WeightMode::from_alpha(alpha) else {
            self.stats.bump_paths_computed();
            return Ok(match self.map.heuristic_shortest_path(from, to, alpha)? {
                Some(path) => FlightOutcome::Computed { path },
                None => FlightOutcome::NoPath,
            });
        };

        if let Some(path) = self.cache.find(start, end, mode, true) {
            self.stats.bump_cache_hits();
            debug!(from, to, ?mode, "route served from cache");
            return Ok(FlightOutcome::Cached { path, mode });
        }
        self.stats.bump_cache_misses();

        self.stats.bump_paths_computed();
        let Some(path) = self.map.heuristic_shortest_path(from, to, alpha)? else {
            return Ok(FlightOutcome::NoPath);
        };
        if self.remember(&path, mode)? {
            Ok(FlightOutcome::Calculated { path, mode })
        } else {
            Ok(FlightOutcome::Computed { path })
        }
    }

    /// Cheapest route avoiding every airline in `excluded`. Never cached.
    pub fn find_specific_flight<S: AsRef<str>>(
        &mut self,
        from: &str,
        to: &str,
        alpha: f32,
        excluded: &[S],
    ) -> Result<FlightOutcome, PlannerError> {
        self.stats.bump_paths_computed();
        Ok(
            match self.map.filtered_shortest_path(from, to, alpha, excluded)? {
                Some(path) => FlightOutcome::Computed { path },
                None => FlightOutcome::NoPath,
            },
        )
    }

    /// Stores a freshly computed route, returning whether it made it into the
    /// cache.
    fn remember(&mut self, path: &[usize], mode: WeightMode) -> Result<bool, PlannerError> {
        match self.cache.insert(path, mode) {
            Ok(_) => return Ok(true),
            Err(CacheError::CacheFull(stored)) => {
                let evicted = self.cache.remove_least_used(1);
                self.stats.bump_evictions(evicted);
                warn!(stored, evicted, "route cache full, evicted least used entry");
            }
            Err(e) => return Err(e.into()),
        }

        match self.cache.insert(path, mode) {
            Ok(_) => Ok(true),
            // the freed slot is not on this key's probe chain
            Err(CacheError::CacheFull(stored)) => {
                warn!(stored, ?mode, "no free slot on probe chain, route not cached");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Takes the flight `from -> to` operated by `airline` out of the map.
    ///
    /// # Errors
    /// [`PlannerError::CannotHalt`] if either airport or the flight itself
    /// does not exist.
    pub fn halt_flight(&mut self, from: &str, to: &str, airline: &str) -> Result<(), PlannerError> {
        let edge = self
            .map
            .take_edge(airline, from, to)
            .map_err(|_| PlannerError::CannotHalt {
                from: from.to_owned(),
                to: to.to_owned(),
                airline: airline.to_owned(),
            })?;

        self.halted.push(HaltedFlight {
            from: from.to_owned(),
            to: to.to_owned(),
            airline: airline.to_owned(),
            weights: edge.weights,
        });
        self.cache.reset();
        info!(from, to, airline, "flight halted");
        Ok(())
    }

    /// Puts a previously halted flight back with the weights it had.
    ///
    /// # Errors
    /// [`PlannerError::CannotResume`] if the flight was never halted, an
    /// airport has disappeared since, or the map already holds that flight.
    pub fn resume_flight(
        &mut self,
        from: &str,
        to: &str,
        airline: &str,
    ) -> Result<(), PlannerError> {
        let cannot_resume = || PlannerError::CannotResume {
            from: from.to_owned(),
            to: to.to_owned(),
            airline: airline.to_owned(),
        };

        let position = self
            .halted
            .iter()
            .position(|flight| flight.matches(from, to, airline))
            .ok_or_else(cannot_resume)?;
        let [w0, w1] = self.halted[position].weights;

        match self.map.add_edge(airline, from, to, w0, w1) {
            Ok(()) => {}
            Err(
                GraphError::VertexNotFound(_)
                | GraphError::EdgeNotFound { .. }
                | GraphError::DuplicateEdge { .. },
            ) => return Err(cannot_resume()),
            Err(e) => return Err(e.into()),
        }

        self.halted.remove(position);
        self.cache.reset();
        info!(from, to, airline, "flight resumed");
        Ok(())
    }

    pub fn open_airport(&mut self, name: &str) -> Result<usize, PlannerError> {
        let index = self.map.insert_vertex(name)?;
        self.cache.reset();
        Ok(index)
    }

    /// Removes an airport and every flight arriving at it.
    pub fn close_airport(&mut self, name: &str) -> Result<(), PlannerError> {
        self.map.remove_vertex(name)?;
        self.cache.reset();
        info!(airport = name, "airport closed");
        Ok(())
    }

    /// Most transfers reachable from `airport` flying only with `airline`.
    ///
    /// # Returns
    /// `Ok(None)` if `airline` operates no flight reachable from `airport`.
    pub fn furthest_transfer(
        &self,
        airport: &str,
        airline: &str,
    ) -> Result<Option<usize>, PlannerError> {
        Ok(self.map.max_depth_via_edge_name(airport, airline)?)
    }

    /// Airport pairs connected in both directions by the same airline.
    pub fn round_trip_routes(&self) -> usize {
        self.map.bidirectional_edge_count()
    }

    pub fn render_map(&self) -> GraphDisplay<'_> {
        self.map.display()
    }

    pub fn render_cache(&self, by_usage: bool) -> CacheDump<'_> {
        let dump = self.cache.dump();
        if by_usage { dump.by_usage() } else { dump }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
IST
ESB
ADB
AYT
TZX
VAN
IST ESB THY 100 1
IST ESB PGS 60 2
ESB IST PGS 60 2
IST ADB THY 90 1
ADB AYT AJET 40 1
ESB TZX THY 120 2
TZX VAN PGS 70 3
ESB VAN AJET 150 1
AYT IST PGS 50 2
VAN ESB AJET 150 1
";

    fn planner(capacity: usize) -> FlightPlanner {
        let map = MultiGraph::from_reader(MAP.as_bytes()).unwrap();
        FlightPlanner::new(map, CacheConfig::with_capacity(capacity))
    }

    #[test]
    fn cache_miss_then_hit() {
        let mut planner = planner(29);

        let first = planner.find_flight("IST", "VAN", 0.0).unwrap();
        assert_eq!(
            first,
            FlightOutcome::Calculated {
                path: vec![0, 1, 1, 2, 5],
                mode: WeightMode::Primary
            }
        );

        let second = planner.find_flight("IST", "VAN", 0.0).unwrap();
        assert_eq!(
            second,
            FlightOutcome::Cached {
                path: vec![0, 1, 1, 2, 5],
                mode: WeightMode::Primary
            }
        );

        assert_eq!(planner.stats().get_cache_hits(), 1);
        assert_eq!(planner.stats().get_cache_misses(), 1);
        assert_eq!(planner.stats().get_paths_computed(), 1);
        assert_eq!(planner.cache().peek(0, 5, WeightMode::Primary).unwrap().usage, 2);
    }

    #[test]
    fn modes_are_cached_separately() {
        let mut planner = planner(29);

        planner.find_flight("IST", "VAN", 0.0).unwrap();
        let by_time = planner.find_flight("IST", "VAN", 1.0).unwrap();

        assert_eq!(
            by_time,
            FlightOutcome::Calculated {
                path: vec![0, 0, 1, 2, 5],
                mode: WeightMode::Secondary
            }
        );
        assert_eq!(planner.cache().len(), 2);
    }

    #[test]
    fn blended_routes_are_not_cached() {
        let mut planner = planner(29);

        let outcome = planner.find_flight("IST", "VAN", 0.5).unwrap();
        assert!(matches!(outcome, FlightOutcome::Computed { .. }));
        assert!(planner.cache().is_empty());
    }

    #[test]
    fn unreachable_and_unknown_airports() {
        let mut planner = planner(29);
        planner.open_airport("KSY").unwrap();

        assert_eq!(
            planner.find_flight("IST", "KSY", 0.0).unwrap(),
            FlightOutcome::NoPath
        );
        assert!(planner.cache().is_empty());
        assert!(matches!(
            planner.find_flight("IST", "LHR", 0.0),
            Err(PlannerError::Graph(GraphError::VertexNotFound(_)))
        ));
    }

    #[test]
    fn specific_flight_avoids_airlines() {
        let mut planner = planner(29);

        let outcome = planner
            .find_specific_flight("IST", "VAN", 0.0, &["AJET"])
            .unwrap();
        assert_eq!(outcome.path(), Some(&[0, 1, 1, 1, 4, 0, 5][..]));

        let outcome = planner
            .find_specific_flight("IST", "VAN", 0.0, &["AJET", "PGS"])
            .unwrap();
        assert_eq!(outcome, FlightOutcome::NoPath);
        assert!(planner.cache().is_empty());
    }

    #[test]
    fn halt_and_resume_round_trip() {
        let mut planner = planner(29);
        planner.find_flight("IST", "VAN", 0.0).unwrap();

        planner.halt_flight("ESB", "VAN", "AJET").unwrap();
        assert!(planner.cache().is_empty());
        assert_eq!(planner.halted_flights().len(), 1);
        assert_eq!(planner.halted_flights()[0].weights, [150.0, 1.0]);
        // the same airline's other flights stay in place
        assert!(planner.map().edge("AJET", "ADB", "AYT").is_ok());

        let detour = planner.find_flight("IST", "VAN", 0.0).unwrap();
        assert_eq!(detour.path(), Some(&[0, 1, 1, 1, 4, 0, 5][..]));

        planner.resume_flight("ESB", "VAN", "AJET").unwrap();
        assert!(planner.halted_flights().is_empty());
        assert_eq!(planner.map().edge("AJET", "ESB", "VAN").unwrap().weights, [150.0, 1.0]);

        let restored = planner.find_flight("IST", "VAN", 0.0).unwrap();
        assert_eq!(restored.path(), Some(&[0, 1, 1, 2, 5][..]));
    }

    #[test]
    fn cannot_halt_missing_flight() {
        let mut planner = planner(29);

        assert!(matches!(
            planner.halt_flight("IST", "VAN", "THY"),
            Err(PlannerError::CannotHalt { .. })
        ));
        assert!(matches!(
            planner.halt_flight("IST", "LHR", "THY"),
            Err(PlannerError::CannotHalt { .. })
        ));
        assert!(planner.halted_flights().is_empty());
        assert_eq!(planner.map().edge_count(), 10);
    }

    #[test]
    fn cannot_resume_flight_that_was_not_halted() {
        let mut planner = planner(29);

        assert!(matches!(
            planner.resume_flight("IST", "ESB", "THY"),
            Err(PlannerError::CannotResume { .. })
        ));

        planner.halt_flight("IST", "ESB", "THY").unwrap();
        planner.resume_flight("IST", "ESB", "THY").unwrap();
        assert!(matches!(
            planner.resume_flight("IST", "ESB", "THY"),
            Err(PlannerError::CannotResume { .. })
        ));
    }

    #[test]
    fn cannot_resume_into_closed_airport() {
        let mut planner = planner(29);
        planner.halt_flight("TZX", "VAN", "PGS").unwrap();
        planner.close_airport("TZX").unwrap();

        assert!(matches!(
            planner.resume_flight("TZX", "VAN", "PGS"),
            Err(PlannerError::CannotResume { .. })
        ));
        assert_eq!(planner.halted_flights().len(), 1);
    }

    #[test]
    fn full_cache_evicts_least_used() {
        // capacity 3 holds at most two routes
        let mut planner = planner(3);

        planner.find_flight("IST", "VAN", 0.0).unwrap();
        planner.find_flight("IST", "VAN", 1.0).unwrap();
        assert_eq!(planner.cache().len(), 2);

        let outcome = planner.find_flight("IST", "ESB", 0.0).unwrap();
        assert!(matches!(outcome, FlightOutcome::Calculated { .. }));
        assert_eq!(planner.stats().get_evictions(), 1);
        assert_eq!(planner.cache().len(), 2);
        assert!(planner.cache().peek(0, 1, WeightMode::Primary).is_some());
    }

    #[test]
    fn route_is_kept_when_its_probe_chain_is_full() {
        // capacity 4 probes only two slots per key, and start alone picks the home slot
        let map = MultiGraph::from_reader(MAP.as_bytes()).unwrap();
        let mut planner = FlightPlanner::new(
            map,
            CacheConfig {
                capacity: 4,
                primes: [1, 0, 0],
            },
        );
        for (from, to, times) in [("IST", "ESB", 2), ("IST", "ADB", 2), ("ADB", "AYT", 1)] {
            for _ in 0..times {
                planner.find_flight(from, to, 0.0).unwrap();
            }
        }
        assert_eq!(planner.cache().len(), 3);

        // evicts ADB -> AYT, but IST's chain (slots 0 and 1) stays occupied
        let outcome = planner.find_flight("IST", "VAN", 0.0).unwrap();
        let expected = planner.map().heuristic_shortest_path("IST", "VAN", 0.0).unwrap();

        assert_eq!(outcome, FlightOutcome::Computed { path: expected.unwrap() });
        assert_eq!(planner.stats().get_evictions(), 1);
        assert_eq!(planner.cache().len(), 2);
        assert!(planner.cache().peek(0, 5, WeightMode::Primary).is_none());
    }

    #[test]
    fn nan_alpha_is_an_error() {
        let mut planner = planner(29);
        assert!(matches!(
            planner.find_flight("IST", "VAN", f32::NAN),
            Err(PlannerError::Graph(GraphError::InvalidAlpha(_)))
        ));
    }

    #[test]
    fn transfers_and_round_trips() {
        let planner = planner(29);

        assert_eq!(planner.furthest_transfer("IST", "THY").unwrap(), Some(2));
        assert_eq!(planner.furthest_transfer("AYT", "THY").unwrap(), None);
        assert!(planner.furthest_transfer("LHR", "THY").is_err());
        // IST <-> ESB via PGS, ESB <-> VAN via AJET
        assert_eq!(planner.round_trip_routes(), 2);
    }

    #[test]
    fn renders_map_and_cache() {
        let mut planner = planner(29);
        planner.find_flight("IST", "ADB", 0.0).unwrap();

        let map = planner.render_map().to_string();
        assert!(map.starts_with("IST\n    --100--1--> ESB (THY)\n"));

        let cache = planner.render_cache(true).to_string();
        assert!(cache.contains("[000]-/002/->[002]"));
    }
}
