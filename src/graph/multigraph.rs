use tracing::debug;

use crate::graph::{FrontierOrder, GraphError};

/// Linear interpolation between the two weight dimensions.
pub fn lerp(w0: f32, w1: f32, alpha: f32) -> f32 {
    w0 * (1.0 - alpha) + w1 * alpha
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub name: String,
    pub weights: [f32; 2],
    /// Index of the destination vertex.
    pub target: usize,
}

impl Edge {
    /// Effective traversal cost for blend factor `alpha`.
    pub fn weight(&self, alpha: f32) -> f32 {
        lerp(self.weights[0], self.weights[1], alpha)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub name: String,
    pub edges: Vec<Edge>,
}

impl Vertex {
    fn new(name: &str) -> Self {
        Vertex {
            name: name.to_owned(),
            edges: Vec::new(),
        }
    }
}

/// In-memory directed multigraph.
///
/// # Invariants
/// - `vertices[i]` is vertex `i`; names are unique.
/// - Every `Edge.target` is a valid index into `vertices`.
/// - A vertex never holds two edges with the same (name, target).
///
/// Vertex indices are positions in the vertex list. Removing a vertex shifts
/// every later vertex down by one, so indices obtained before a mutation must
/// be resolved again by name afterwards. Name lookups are linear scans.
#[derive(Debug, Clone, Default)]
pub struct MultiGraph {
    vertices: Vec<Vertex>,
    frontier_order: FrontierOrder,
}

impl MultiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frontier_order(mut self, order: FrontierOrder) -> Self {
        self.frontier_order = order;
        self
    }

    pub fn frontier_order(&self) -> FrontierOrder {
        self.frontier_order
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.vertices.iter().position(|v| v.name == name)
    }

    pub fn vertex_index(&self, name: &str) -> Result<usize, GraphError> {
        self.position(name)
            .ok_or_else(|| GraphError::VertexNotFound(name.to_owned()))
    }

    /// The edge called `name` going from `from` to `to`.
    pub fn edge(&self, name: &str, from: &str, to: &str) -> Result<&Edge, GraphError> {
        let source = self.vertex_index(from)?;
        let target = self.vertex_index(to)?;
        self.vertices[source]
            .edges
            .iter()
            .find(|e| e.name == name && e.target == target)
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: from.to_owned(),
                edge: name.to_owned(),
            })
    }

    pub fn insert_vertex(&mut self, name: &str) -> Result<usize, GraphError> {
        if self.position(name).is_some() {
            return Err(GraphError::DuplicateVertex(name.to_owned()));
        }
        self.vertices.push(Vertex::new(name));
        debug!(vertex = name, index = self.vertices.len() - 1, "inserted vertex");
        Ok(self.vertices.len() - 1)
    }

    /// Removes `name` together with every edge pointing at it.
    ///
    /// Vertices after the removed one move down by one index and all edge
    /// targets are renumbered to match.
    pub fn remove_vertex(&mut self, name: &str) -> Result<(), GraphError> {
        let removed = self.vertex_index(name)?;
        self.vertices.remove(removed);

        let mut dropped_edges = 0;
        for vertex in &mut self.vertices {
            let before = vertex.edges.len();
            vertex.edges.retain(|e| e.target != removed);
            dropped_edges += before - vertex.edges.len();

            for edge in &mut vertex.edges {
                if edge.target > removed {
                    edge.target -= 1;
                }
            }
        }

        debug!(vertex = name, index = removed, dropped_edges, "removed vertex");
        Ok(())
    }

    /// Appends an edge `name` from `from` to `to`.
    ///
    /// # Errors
    /// - [`GraphError::VertexNotFound`] if either endpoint is missing
    ///   (the destination is checked first).
    /// - [`GraphError::DuplicateEdge`] if `from` already has an edge with the
    ///   same name to the same destination.
    /// - [`GraphError::InvalidWeight`] if a weight is negative or NaN.
    pub fn add_edge(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        w0: f32,
        w1: f32,
    ) -> Result<(), GraphError> {
        let target = self.vertex_index(to)?;
        let source = self.vertex_index(from)?;

        let edges = &self.vertices[source].edges;
        if edges.iter().any(|e| e.name == name && e.target == target) {
            return Err(GraphError::DuplicateEdge {
                name: name.to_owned(),
                from: from.to_owned(),
                to: to.to_owned(),
            });
        }
        if !(w0 >= 0.0 && w1 >= 0.0) {
            return Err(GraphError::InvalidWeight {
                name: name.to_owned(),
                w0,
                w1,
            });
        }

        self.vertices[source].edges.push(Edge {
            name: name.to_owned(),
            weights: [w0, w1],
            target,
        });
        debug!(edge = name, from, to, w0, w1, "added edge");
        Ok(())
    }

    /// Removes the first edge called `name` found while scanning vertices in
    /// index order.
    ///
    /// Both endpoints must exist, but the match itself is made on the edge
    /// name alone: if several vertices carry an edge with that name, the one
    /// on the lowest-indexed vertex goes, whatever `from` and `to` say.
    ///
    /// # Errors
    /// - [`GraphError::VertexNotFound`] if either endpoint is missing.
    /// - [`GraphError::EdgeNotFound`] if no edge in the graph has that name.
    pub fn remove_edge(&mut self, name: &str, from: &str, to: &str) -> Result<Edge, GraphError> {
        self.vertex_index(from)?;
        self.vertex_index(to)?;

        let found = self.vertices.iter().enumerate().find_map(|(v, vertex)| {
            vertex
                .edges
                .iter()
                .position(|e| e.name == name)
                .map(|e| (v, e))
        });
        let Some((vertex, position)) = found else {
            return Err(GraphError::EdgeNotFound {
                from: from.to_owned(),
                edge: name.to_owned(),
            });
        };

        let edge = self.vertices[vertex].edges.remove(position);
        debug!(edge = name, from = %self.vertices[vertex].name, "removed edge");
        Ok(edge)
    }

    /// Removes exactly the edge `name` going from `from` to `to`.
    ///
    /// Unlike [`remove_edge`](Self::remove_edge), edges with the same name on
    /// other vertices or towards other destinations are left alone.
    ///
    /// # Errors
    /// - [`GraphError::VertexNotFound`] if either endpoint is missing.
    /// - [`GraphError::EdgeNotFound`] if `from` has no such edge to `to`.
    pub fn take_edge(&mut self, name: &str, from: &str, to: &str) -> Result<Edge, GraphError> {
        let source = self.vertex_index(from)?;
        let target = self.vertex_index(to)?;

        let position = self.vertices[source]
            .edges
            .iter()
            .position(|e| e.name == name && e.target == target)
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: from.to_owned(),
                edge: name.to_owned(),
            })?;

        let edge = self.vertices[source].edges.remove(position);
        debug!(edge = name, from, to, "took edge");
        Ok(edge)
    }
}
