use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::info;

use crate::{fs::LoadError, graph::MultiGraph};

fn parse_weight(token: &str, line: usize) -> Result<f32, LoadError> {
    token.parse::<f32>().map_err(|_| LoadError::InvalidWeight {
        line,
        token: token.to_owned(),
    })
}

impl MultiGraph {
    /// Builds a graph from a text map.
    ///
    /// Lines are applied in order, so an edge line must come after both of its
    /// vertex lines. Loading stops at the first bad line.
    ///
    /// # Errors
    /// - [`LoadError::MalformedLine`] for a line that is neither 1 nor 5 tokens.
    /// - [`LoadError::InvalidWeight`] for a weight that does not parse.
    /// - [`LoadError::Graph`] when the line breaks a graph invariant (duplicate
    ///   vertex, unknown endpoint, duplicate edge, negative weight).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut graph = MultiGraph::new();

        for (number, line) in reader.lines().enumerate() {
            let line_no = number + 1;
            let line = line.map_err(|source| LoadError::Read {
                line: line_no,
                source,
            })?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let applied = match tokens.as_slice() {
                [vertex] => graph.insert_vertex(vertex).map(|_| ()),
                [from, to, name, w0, w1] => {
                    let w0 = parse_weight(w0, line_no)?;
                    let w1 = parse_weight(w1, line_no)?;
                    graph.add_edge(name, from, to, w0, w1)
                }
                _ => {
                    return Err(LoadError::MalformedLine {
                        line: line_no,
                        tokens: tokens.len(),
                    });
                }
            };
            applied.map_err(|source| LoadError::Graph {
                line: line_no,
                source,
            })?;
        }

        Ok(graph)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            vertices = graph.len(),
            edges = graph.edge_count(),
            "flight map loaded"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        fs::LoadError,
        graph::{GraphError, MultiGraph},
    };

    #[test]
    fn parses_vertices_edges_and_skips_comments() {
        let map = "\
# airports
IST
ANK

IZM
# flights
IST ANK THY 100 1.5
ANK IZM PGS 80.5 1
";
        let graph = MultiGraph::from_reader(map.as_bytes()).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge("PGS", "ANK", "IZM").unwrap().weights, [80.5, 1.0]);
    }

    #[test]
    fn malformed_line_reports_position() {
        let map = "IST\nANK\nIST ANK THY 100\n";
        match MultiGraph::from_reader(map.as_bytes()) {
            Err(LoadError::MalformedLine { line, tokens }) => {
                assert_eq!(line, 3);
                assert_eq!(tokens, 4);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_weight_is_reported() {
        let map = "IST\nANK\nIST ANK THY cheap 1\n";
        assert!(matches!(
            MultiGraph::from_reader(map.as_bytes()),
            Err(LoadError::InvalidWeight { line: 3, .. })
        ));
    }

    #[test]
    fn graph_errors_carry_the_line() {
        let map = "IST\nIST\n";
        match MultiGraph::from_reader(map.as_bytes()) {
            Err(LoadError::Graph { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(source, GraphError::DuplicateVertex("IST".into()));
            }
            other => panic!("unexpected {other:?}"),
        }

        let map = "IST\nIST ANK THY 1 1\n";
        assert!(matches!(
            MultiGraph::from_reader(map.as_bytes()),
            Err(LoadError::Graph {
                line: 2,
                source: GraphError::VertexNotFound(_)
            })
        ));
    }

    #[test]
    fn loading_example_map() {
        let graph = MultiGraph::load_from_path("test_data/flights.map").unwrap();

        assert_eq!(graph.len(), 6);
        assert_eq!(graph.edge_count(), 10);
        assert!(graph.vertex_index("ESB").is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            MultiGraph::load_from_path("test_data/missing.map"),
            Err(LoadError::Open { .. })
        ));
    }
}
