//! Priority structures for graph traversal and cache diagnostics.
//!
//! This module provides a totally ordered floating-point wrapper so that path
//! distances can act as priorities, and a binary heap over (priority, payload)
//! pairs that can be ordered either max-first or min-first.

mod ordered_float;
mod pair_heap;
mod priority_pair;

pub use ordered_float::*;
pub use pair_heap::*;
pub use priority_pair::*;
