use std::{io, path::PathBuf};

use thiserror::Error;

use crate::graph::GraphError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: read failed: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected 1 or 5 tokens, found {tokens}")]
    MalformedLine { line: usize, tokens: usize },

    #[error("line {line}: \"{token}\" is not a valid weight")]
    InvalidWeight { line: usize, token: String },

    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },
}
