//! Counters for how route queries were answered.
//!
//! A [`Stats`] records cache hits and misses, shortest-path searches that
//! actually ran, and entries evicted to make room in a full cache.

mod stats;
pub use stats::*;
