use thiserror::Error;

use crate::{
    cache::{CacheConfigError, CacheError},
    fs::LoadError,
    graph::GraphError,
};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("a flight between \"{from}\" and \"{to}\" via {airline} is not found and cannot be halted")]
    CannotHalt {
        from: String,
        to: String,
        airline: String,
    },

    #[error("a flight between \"{from}\" and \"{to}\" via {airline} cannot be resumed")]
    CannotResume {
        from: String,
        to: String,
        airline: String,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] CacheConfigError),
}
