use std::fmt;

use crate::graph::MultiGraph;

/// Renders a validated path as `A --2--> B --3.5--> C`, edge costs blended
/// with the α the path was computed for.
pub struct PathDisplay<'a> {
    graph: &'a MultiGraph,
    path: &'a [usize],
    alpha: f32,
}

/// Renders every vertex followed by its outgoing edges, both raw weights
/// shown.
pub struct GraphDisplay<'a> {
    graph: &'a MultiGraph,
}

impl MultiGraph {
    /// Returns `None` if `path` is not a valid alternating vertex/edge
    /// sequence for this graph (see [`MultiGraph::path_weight`]).
    pub fn display_path<'a>(&'a self, path: &'a [usize], alpha: f32) -> Option<PathDisplay<'a>> {
        self.path_weight(path, alpha)?;
        Some(PathDisplay {
            graph: self,
            path,
            alpha,
        })
    }

    pub fn display(&self) -> GraphDisplay<'_> {
        GraphDisplay { graph: self }
    }
}

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices = self.graph.vertices();
        write!(f, "{}", vertices[self.path[0]].name)?;
        for step in self.path.windows(3).step_by(2) {
            let edge = &vertices[step[0]].edges[step[1]];
            write!(f, " --{}--> {}", edge.weight(self.alpha), vertices[step[2]].name)?;
        }
        Ok(())
    }
}

impl fmt::Display for GraphDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices = self.graph.vertices();
        for vertex in vertices {
            writeln!(f, "{}", vertex.name)?;
            for edge in &vertex.edges {
                writeln!(
                    f,
                    "    --{}--{}--> {} ({})",
                    edge.weights[0], edge.weights[1], vertices[edge.target].name, edge.name
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::MultiGraph;

    fn sample() -> MultiGraph {
        let mut graph = MultiGraph::new();
        for name in ["IST", "ANK", "IZM"] {
            graph.insert_vertex(name).unwrap();
        }
        graph.add_edge("THY", "IST", "ANK", 2.0, 3.0).unwrap();
        graph.add_edge("PGS", "ANK", "IZM", 1.0, 0.5).unwrap();
        graph
    }

    #[test]
    fn path_shows_blended_costs() {
        let graph = sample();
        let path = graph.heuristic_shortest_path("IST", "IZM", 0.5).unwrap().unwrap();

        let rendered = graph.display_path(&path, 0.5).unwrap().to_string();
        assert_eq!(rendered, "IST --2.5--> ANK --0.75--> IZM");
    }

    #[test]
    fn single_vertex_path() {
        let graph = sample();
        assert_eq!(graph.display_path(&[2], 0.0).unwrap().to_string(), "IZM");
    }

    #[test]
    fn invalid_path_is_not_displayed() {
        let graph = sample();
        assert!(graph.display_path(&[0, 3, 1], 0.0).is_none());
        assert!(graph.display_path(&[], 0.0).is_none());
    }

    #[test]
    fn graph_lists_edges_under_their_source() {
        let rendered = sample().display().to_string();
        assert_eq!(
            rendered,
            "IST\n    --2--3--> ANK (THY)\nANK\n    --1--0.5--> IZM (PGS)\nIZM\n"
        );
    }
}
