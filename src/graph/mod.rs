//! Directed multigraph with two-dimensional edge weights.
//!
//! Vertices are identified by unique names and store their outgoing edges in
//! insertion order. Several edges may connect the same pair of vertices as long
//! as their names differ. Every edge carries two independent weights, and
//! path queries blend them with a caller-supplied factor α.
//!
//! # Submodules
//!
//! - `multigraph`: vertices, edges and structural mutations
//! - `path_engine`: shortest-path and hop-bounded traversals
//! - `display`: human-readable rendering of paths and of the whole graph

mod display;
mod error;
mod multigraph;
mod path_engine;

pub use display::*;
pub use error::*;
pub use multigraph::*;
pub use path_engine::*;
