//! Flight planning on top of the multigraph and the path cache.
//!
//! A [`FlightPlanner`] owns a flight map, a [`PathCache`](crate::cache::PathCache)
//! for routes computed on a single weight dimension, and the list of flights
//! that are currently halted. Every structural change to the map resets the
//! cache, since cached sequences hold vertex and edge indices.

mod error;
mod flight_planner;

pub use error::*;
pub use flight_planner::*;
