//! Fixed-capacity path cache.
//!
//! Computed routes are stored in an open-addressing table keyed by
//! (start vertex, end vertex, weight mode). Collisions are resolved with
//! quadratic probing, deleted slots become tombstones so that probe chains
//! stay intact, and every entry carries a usage counter that drives
//! least-used eviction.

mod config;
mod display;
mod error;
mod slot;
mod table;

pub use config::*;
pub use display::*;
pub use error::*;
pub use slot::*;
pub use table::*;
