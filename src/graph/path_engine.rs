use hashbrown::HashSet;
use tracing::trace;

use crate::{
    candidates::{MaxPairHeap, MinPairHeap, TotalF32},
    graph::{Edge, GraphError, MultiGraph},
};

/// Order in which the shortest-path frontier expands vertices.
///
/// `VertexIndex` pops the highest vertex index first. Distances are still
/// tracked exactly, but expansion order ignores them, so the early exit on
/// reaching the destination can return a path that is not the cheapest one.
/// `Distance` is textbook Dijkstra: the closest vertex is expanded first and
/// the returned path is always optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierOrder {
    #[default]
    VertexIndex,
    Distance,
}

/// Pending vertices, each paired with the distance it was queued at.
enum Frontier {
    ByVertexIndex(MaxPairHeap<usize, TotalF32>),
    ByDistance(MinPairHeap<TotalF32, usize>),
}

impl Frontier {
    fn new(order: FrontierOrder) -> Self {
        match order {
            FrontierOrder::VertexIndex => Frontier::ByVertexIndex(MaxPairHeap::new()),
            FrontierOrder::Distance => Frontier::ByDistance(MinPairHeap::new()),
        }
    }

    fn push(&mut self, vertex: usize, distance: TotalF32) {
        match self {
            Frontier::ByVertexIndex(heap) => heap.push(vertex, distance),
            Frontier::ByDistance(heap) => heap.push(distance, vertex),
        }
    }

    fn pop(&mut self) -> Option<(usize, TotalF32)> {
        match self {
            Frontier::ByVertexIndex(heap) => heap.pop().map(|p| (p.key, p.value)),
            Frontier::ByDistance(heap) => heap.pop().map(|p| (p.value, p.key)),
        }
    }

    /// Whether an entry queued at `queued` is outdated once the vertex is known
    /// to be reachable at `best`. Only distance ordering discards such entries.
    fn is_stale(&self, queued: TotalF32, best: TotalF32) -> bool {
        matches!(self, Frontier::ByDistance(_)) && queued > best
    }
}

/// Clamps `alpha` into `[0, 1]`. NaN has no place in that range.
fn checked_alpha(alpha: f32) -> Result<f32, GraphError> {
    if alpha.is_nan() {
        return Err(GraphError::InvalidAlpha(alpha));
    }
    Ok(alpha.clamp(0.0, 1.0))
}

impl MultiGraph {
    /// Shortest path from `from` to `to`, blending edge weights with `alpha`.
    ///
    /// The path is returned as an alternating sequence
    /// `[v0, e0, v1, e1, …, vk]` of vertex indices and edge indices, where each
    /// `ei` indexes the outgoing edge list of `vi`. A vertex reaches itself
    /// through the one-element path `[v0]`.
    ///
    /// `alpha` is clamped to `[0, 1]`. Expansion order follows the graph's
    /// [`FrontierOrder`].
    ///
    /// # Returns
    /// `Ok(None)` if `to` is unreachable from `from`.
    ///
    /// # Errors
    /// - [`GraphError::VertexNotFound`] if either name is unknown.
    /// - [`GraphError::InvalidAlpha`] if `alpha` is NaN.
    pub fn heuristic_shortest_path(
        &self,
        from: &str,
        to: &str,
        alpha: f32,
    ) -> Result<Option<Vec<usize>>, GraphError> {
        let alpha = checked_alpha(alpha)?;
        let source = self.vertex_index(from)?;
        let target = self.vertex_index(to)?;
        Ok(self.shortest_path(source, target, alpha, |_| true))
    }

    /// Same as [`heuristic_shortest_path`](Self::heuristic_shortest_path), but
    /// edges whose name appears in `excluded` are ignored.
    pub fn filtered_shortest_path<S: AsRef<str>>(
        &self,
        from: &str,
        to: &str,
        alpha: f32,
        excluded: &[S],
    ) -> Result<Option<Vec<usize>>, GraphError> {
        let alpha = checked_alpha(alpha)?;
        let source = self.vertex_index(from)?;
        let target = self.vertex_index(to)?;
        let excluded: HashSet<&str> = excluded.iter().map(|name| name.as_ref()).collect();
        Ok(self.shortest_path(source, target, alpha, |edge| {
            !excluded.contains(edge.name.as_str())
        }))
    }

    fn shortest_path<F>(
        &self,
        source: usize,
        target: usize,
        alpha: f32,
        usable: F,
    ) -> Option<Vec<usize>>
    where
        F: Fn(&Edge) -> bool,
    {
        let mut distances = vec![TotalF32::INFINITY; self.len()];
        // (previous vertex, edge index within it)
        let mut previous: Vec<Option<(usize, usize)>> = vec![None; self.len()];
        let mut frontier = Frontier::new(self.frontier_order());
        let mut expanded = 0usize;

        distances[source] = TotalF32::ZERO;
        frontier.push(source, TotalF32::ZERO);

        while let Some((current, queued)) = frontier.pop() {
            if frontier.is_stale(queued, distances[current]) {
                continue;
            }
            expanded += 1;

            for (edge_index, edge) in self.vertices()[current].edges.iter().enumerate() {
                if !usable(edge) {
                    continue;
                }
                let candidate = distances[current] + edge.weight(alpha);
                if candidate < distances[edge.target] {
                    distances[edge.target] = candidate;
                    previous[edge.target] = Some((current, edge_index));
                    frontier.push(edge.target, candidate);
                }
            }

            if current == target {
                break;
            }
        }
        trace!(source, target, expanded, "shortest path search finished");

        let mut sequence = vec![target];
        let mut current = target;
        while current != source {
            let (vertex, edge_index) = previous[current]?;
            sequence.push(edge_index);
            sequence.push(vertex);
            current = vertex;
            if sequence.len() > 2 * self.len() {
                return None;
            }
        }
        sequence.reverse();
        Some(sequence)
    }

    /// Largest hop count reachable from `vertex` using only edges called
    /// `edge_name`, each hop costing one.
    ///
    /// # Returns
    /// `Ok(None)` if no edge with that name can be reached from `vertex`.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if `vertex` is unknown.
    pub fn max_depth_via_edge_name(
        &self,
        vertex: &str,
        edge_name: &str,
    ) -> Result<Option<usize>, GraphError> {
        let source = self.vertex_index(vertex)?;
        let mut hops: Vec<Option<usize>> = vec![None; self.len()];
        let mut frontier = Frontier::new(self.frontier_order());
        let mut traversed_any = false;

        hops[source] = Some(0);
        frontier.push(source, TotalF32::ZERO);

        while let Some((current, _)) = frontier.pop() {
            let Some(depth) = hops[current] else {
                continue;
            };
            for edge in &self.vertices()[current].edges {
                if edge.name != edge_name {
                    continue;
                }
                traversed_any = true;
                let candidate = depth + 1;
                if hops[edge.target].is_none_or(|known| candidate < known) {
                    hops[edge.target] = Some(candidate);
                    frontier.push(edge.target, TotalF32(candidate as f32));
                }
            }
        }

        if !traversed_any {
            return Ok(None);
        }
        Ok(hops.into_iter().flatten().max())
    }

    /// Number of unordered vertex pairs `{u, v}`, `u != v`, joined by an edge
    /// `u -> v` and an edge `v -> u` carrying the same name.
    ///
    /// A pair linked that way under several names still counts once.
    pub fn bidirectional_edge_count(&self) -> usize {
        let mut pairs: HashSet<(usize, usize)> = HashSet::new();
        for (u, vertex) in self.vertices().iter().enumerate() {
            for edge in &vertex.edges {
                let v = edge.target;
                if u == v {
                    continue;
                }
                let returns = self.vertices()[v]
                    .edges
                    .iter()
                    .any(|back| back.target == u && back.name == edge.name);
                if returns {
                    pairs.insert((u.min(v), u.max(v)));
                }
            }
        }
        pairs.len()
    }

    /// Total blended weight of an alternating vertex/edge sequence.
    ///
    /// # Returns
    /// `None` if the sequence is empty, has even length, references a missing
    /// vertex or edge, or an edge does not lead to the next vertex.
    pub fn path_weight(&self, path: &[usize], alpha: f32) -> Option<f32> {
        if path.len() % 2 == 0 {
            return None;
        }
        self.vertex(path[0])?;

        let mut total = 0.0;
        for step in path.windows(3).step_by(2) {
            let (vertex, edge_index, next) = (step[0], step[1], step[2]);
            let edge = self.vertex(vertex)?.edges.get(edge_index)?;
            if edge.target != next {
                return None;
            }
            total += edge.weight(alpha);
        }
        Some(total)
    }
}
