use thiserror::Error;

/// Structural failures of graph mutations and lookups.
///
/// Every mutating operation validates its arguments before touching the graph,
/// so an `Err` always means the graph is unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphError {
    #[error("vertex \"{0}\" not found")]
    VertexNotFound(String),

    #[error("vertex \"{0}\" already exists")]
    DuplicateVertex(String),

    #[error("no edge named \"{edge}\" found from \"{from}\"")]
    EdgeNotFound { from: String, edge: String },

    #[error("edge \"{name}\" from \"{from}\" to \"{to}\" already exists")]
    DuplicateEdge {
        name: String,
        from: String,
        to: String,
    },

    #[error("edge \"{name}\" has invalid weights ({w0}, {w1}), weights must be non-negative")]
    InvalidWeight { name: String, w0: f32, w1: f32 },

    #[error("blend factor {0} is not a number")]
    InvalidAlpha(f32),
}
