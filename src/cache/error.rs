use std::{io, path::PathBuf};

use thiserror::Error;

/// Hard failures of [`PathCache::insert`](crate::cache::PathCache::insert).
///
/// A missing key is never an error: lookups and removals report it through
/// `Option`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cannot cache an empty sequence")]
    EmptySequence,

    #[error("cache is full ({0} entries stored)")]
    CacheFull(usize),
}

#[derive(Debug, Error)]
pub enum CacheConfigError {
    #[error("failed to read cache config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed cache config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache capacity must be greater than 0")]
    ZeroCapacity,

    #[error("cache capacity {0} is not prime")]
    NonPrimeCapacity(usize),
}
