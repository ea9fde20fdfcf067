//! Single-source shortest and longest paths over a DAG
//!
//! All three searches relax edges in a caller-supplied topological order, so
//! each runs in O(V + E). Every edge examined counts as one relaxation.

use super::{Graph, WeightedEdge};
use crate::metrics::{Metrics, Timer};

/// Distances and predecessor links from one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Distance of each vertex; `None` if unreachable
    pub dist: Vec<Option<i64>>,
    /// Predecessor on the best path; `None` for the source and unreachable vertices
    pub parent: Vec<Option<usize>>,
}

impl PathResult {
    /// Vertices from `source` to `target`, empty if `target` is not reachable
    pub fn path_to(&self, source: usize, target: usize) -> Vec<usize> {
        DagShortestPath::reconstruct_path(source, target, &self.parent)
    }
}

/// The longest path anywhere in the DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPath {
    pub path: Vec<usize>,
    pub length: i64,
}

#[derive(Clone, Copy)]
enum Objective {
    Minimize,
    Maximize,
}

impl Objective {
    fn improves(self, candidate: i64, current: Option<i64>) -> bool {
        match (self, current) {
            (_, None) => true,
            (Objective::Minimize, Some(d)) => candidate < d,
            (Objective::Maximize, Some(d)) => candidate > d,
        }
    }
}

/// Path searches over a weighted DAG
#[derive(Debug, Clone)]
pub struct DagShortestPath {
    adj: Vec<Vec<WeightedEdge>>,
    weight_model: String,
    metrics: Metrics,
}

impl DagShortestPath {
    pub fn new(adj: Vec<Vec<WeightedEdge>>, weight_model: impl Into<String>) -> Self {
        Self {
            adj,
            weight_model: weight_model.into(),
            metrics: Metrics::new(),
        }
    }

    /// Build from a graph dataset, keeping its edge weights
    pub fn from_graph(graph: &Graph) -> Self {
        Self::new(graph.weighted_adjacency(), graph.weight_model.clone())
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    pub fn weight_model(&self) -> &str {
        &self.weight_model
    }

    /// Counters from the most recent search
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Minimum-weight distances from `source`
    pub fn shortest_paths(&mut self, source: usize, order: &[usize]) -> PathResult {
        self.search(&[source], order, Objective::Minimize)
    }

    /// Maximum-weight distances from `source`
    pub fn longest_paths(&mut self, source: usize, order: &[usize]) -> PathResult {
        self.search(&[source], order, Objective::Maximize)
    }

    /// Longest path starting from any vertex
    pub fn critical_path(&mut self, order: &[usize]) -> CriticalPath {
        let result = self.search(order, order, Objective::Maximize);

        let mut best: Option<(usize, i64)> = None;
        for (v, dist) in result.dist.iter().enumerate() {
            if let Some(d) = *dist {
                if best.map_or(true, |(_, b)| d > b) {
                    best = Some((v, d));
                }
            }
        }

        match best {
            Some((target, length)) => {
                let mut path = vec![target];
                let mut cur = target;
                while let Some(prev) = result.parent[cur] {
                    path.push(prev);
                    cur = prev;
                }
                path.reverse();
                CriticalPath { path, length }
            }
            None => CriticalPath {
                path: Vec::new(),
                length: 0,
            },
        }
    }

    /// Follow predecessor links back from `target`
    ///
    /// Returns an empty path when the chain does not lead back to `source`.
    pub fn reconstruct_path(source: usize, target: usize, parent: &[Option<usize>]) -> Vec<usize> {
        if target >= parent.len() {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut cur = target;
        while let Some(prev) = parent[cur] {
            path.push(prev);
            cur = prev;
        }
        path.reverse();

        if path.first() == Some(&source) {
            path
        } else {
            Vec::new()
        }
    }

    fn search(&mut self, sources: &[usize], order: &[usize], objective: Objective) -> PathResult {
        let timer = Timer::start();
        let mut metrics = Metrics::new();
        let n = self.adj.len();

        let mut dist: Vec<Option<i64>> = vec![None; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        for &s in sources.iter().filter(|&&s| s < n) {
            dist[s] = Some(0);
        }

        for &u in order {
            let Some(du) = dist[u] else { continue };
            for edge in &self.adj[u] {
                metrics.relaxations += 1;
                let candidate = du.saturating_add(edge.weight);
                if objective.improves(candidate, dist[edge.to]) {
                    dist[edge.to] = Some(candidate);
                    parent[edge.to] = Some(u);
                }
            }
        }

        timer.stop(&mut metrics);
        self.metrics = metrics;
        PathResult { dist, parent }
    }
}
