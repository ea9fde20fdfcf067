//! Graph datasets and the algorithms benchmarked over them
//!
//! Datasets are JSON documents of the form
//! `{"directed": true, "n": 8, "edges": [{"u": 0, "v": 1, "w": 3}], "source": 0, "weight_model": "edge"}`.
//! Edges are always read as directed `u -> v`.

pub mod dagsp;
pub mod scc;
pub mod topo;

pub use dagsp::{CriticalPath, DagShortestPath, PathResult};
pub use scc::{tarjan_scc, SccResult};
pub use topo::{dfs_sort, expand_components, kahn_sort, TopoOrder};

use crate::types::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Adjacency list: successors of each vertex
pub type Adjacency = Vec<Vec<usize>>;

/// A weighted directed edge `u -> v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    #[serde(default)]
    pub w: i64,
}

/// Outgoing edge as stored in a weighted adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdge {
    pub to: usize,
    pub weight: i64,
}

impl WeightedEdge {
    pub fn new(to: usize, weight: i64) -> Self {
        Self { to, weight }
    }
}

/// A graph dataset as loaded from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default = "default_true")]
    pub directed: bool,
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub source: usize,
    #[serde(default = "default_weight_model", alias = "weightModel")]
    pub weight_model: String,
}

fn default_true() -> bool {
    true
}

fn default_weight_model() -> String {
    "edge".to_string()
}

impl Graph {
    /// Build a directed graph from an edge list
    pub fn new(n: usize, edges: Vec<Edge>) -> Self {
        Self {
            directed: true,
            n,
            edges,
            source: 0,
            weight_model: default_weight_model(),
        }
    }

    /// Load and validate a graph dataset from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Loading graph dataset: {:?}", path);

        let file = File::open(path).map_err(|e| StatsError::from_open(path, e))?;
        let graph: Graph = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StatsError::MalformedInput(format!("{:?}: {}", path, e)))?;
        graph.validate()?;

        if !graph.directed {
            log::warn!("{:?} is marked undirected; edges are treated as directed", path);
        }
        log::debug!("Graph loaded: n={} m={}", graph.n, graph.edge_count());
        Ok(graph)
    }

    /// Parse and validate a graph from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let graph: Graph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Check that every edge endpoint and the source are valid vertices
    pub fn validate(&self) -> Result<()> {
        if let Some(edge) = self.edges.iter().find(|e| e.u >= self.n || e.v >= self.n) {
            return Err(StatsError::InvalidGraph(format!(
                "edge {} -> {} out of range for n = {}",
                edge.u, edge.v, self.n
            )));
        }
        if self.n > 0 && self.source >= self.n {
            return Err(StatsError::InvalidGraph(format!(
                "source {} out of range for n = {}",
                self.source, self.n
            )));
        }
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Unweighted successor lists, in edge-list order
    pub fn adjacency(&self) -> Adjacency {
        let mut adj = vec![Vec::new(); self.n];
        for edge in &self.edges {
            adj[edge.u].push(edge.v);
        }
        adj
    }

    /// Weighted successor lists, in edge-list order
    pub fn weighted_adjacency(&self) -> Vec<Vec<WeightedEdge>> {
        let mut adj = vec![Vec::new(); self.n];
        for edge in &self.edges {
            adj[edge.u].push(WeightedEdge::new(edge.v, edge.w));
        }
        adj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_with_defaults() {
        let graph = Graph::from_json_str(r#"{"n": 3, "edges": [{"u": 0, "v": 1, "w": 4}, {"u": 1, "v": 2}]}"#).unwrap();
        assert!(graph.directed);
        assert_eq!(graph.source, 0);
        assert_eq!(graph.weight_model, "edge");
        assert_eq!(graph.edges[1].w, 0);
        assert_eq!(graph.adjacency(), vec![vec![1], vec![2], vec![]]);
    }

    #[test]
    fn test_weight_model_alias() {
        let graph = Graph::from_json_str(r#"{"n": 1, "edges": [], "weightModel": "node"}"#).unwrap();
        assert_eq!(graph.weight_model, "node");
    }

    #[test]
    fn test_edge_out_of_range() {
        let err = Graph::from_json_str(r#"{"n": 2, "edges": [{"u": 0, "v": 2, "w": 1}]}"#).unwrap_err();
        assert!(matches!(err, StatsError::InvalidGraph(_)));
    }

    #[test]
    fn test_source_out_of_range() {
        let err = Graph::from_json_str(r#"{"n": 2, "edges": [], "source": 5}"#).unwrap_err();
        assert!(matches!(err, StatsError::InvalidGraph(_)));
    }

    #[test]
    fn test_weighted_adjacency_keeps_weights() {
        let graph = Graph::new(
            3,
            vec![Edge { u: 0, v: 1, w: 2 }, Edge { u: 0, v: 2, w: 5 }],
        );
        let adj = graph.weighted_adjacency();
        assert_eq!(adj[0], vec![WeightedEdge::new(1, 2), WeightedEdge::new(2, 5)]);
        assert!(adj[1].is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"directed": true, "n": 2, "edges": [{{"u": 0, "v": 1, "w": 3}}], "source": 1, "weight_model": "edge"}}"#
        )
        .unwrap();

        let graph = Graph::load(file.path()).unwrap();
        assert_eq!(graph.n, 2);
        assert_eq!(graph.source, 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Graph::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, StatsError::MissingFile(_)));
    }

    #[test]
    fn test_load_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = Graph::load(file.path()).unwrap_err();
        assert!(matches!(err, StatsError::MalformedInput(_)));
    }
}
