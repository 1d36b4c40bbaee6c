//! File system I/O for loading flight maps.
//!
//! Maps are plain text: one vertex name per line, or one edge per line as
//! `<from> <to> <edge name> <weight0> <weight1>`. Blank lines and lines
//! starting with `#` are skipped.

mod error;
mod map_load;

pub use error::*;
