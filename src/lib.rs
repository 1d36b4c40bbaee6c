pub mod cache;
pub mod candidates;
pub mod fs;
pub mod graph;
pub mod planner;
pub mod statistics;
