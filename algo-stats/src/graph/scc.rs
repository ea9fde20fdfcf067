//! Tarjan's strongly connected components
//!
//! The depth-first search keeps an explicit call stack so large or deeply
//! chained datasets cannot overflow the thread stack. Components come out in
//! completion order, which is a reverse topological order of the condensation.

use super::Adjacency;
use crate::metrics::{Metrics, Timer};
use std::collections::HashSet;

const UNVISITED: usize = usize::MAX;

/// Components found by Tarjan's algorithm
#[derive(Debug, Clone)]
pub struct SccResult {
    /// Vertices of each component, in stack-pop order
    pub components: Vec<Vec<usize>>,
    /// Component index of every vertex
    pub component_of: Vec<usize>,
    pub metrics: Metrics,
}

impl SccResult {
    /// Number of components
    pub fn count(&self) -> usize {
        self.components.len()
    }

    /// True if some component holds more than one vertex
    pub fn has_cycle(&self) -> bool {
        self.components.iter().any(|c| c.len() > 1)
    }

    /// Contract every component to a single vertex
    ///
    /// Edges inside a component are dropped and parallel edges between two
    /// components are merged, so the result is a simple DAG.
    pub fn condensation(&self, adj: &[Vec<usize>]) -> Adjacency {
        let mut dag = vec![Vec::new(); self.components.len()];
        let mut seen = HashSet::new();

        for (u, successors) in adj.iter().enumerate() {
            let cu = self.component_of[u];
            for &v in successors {
                let cv = self.component_of[v];
                if cu != cv && seen.insert((cu, cv)) {
                    dag[cu].push(cv);
                }
            }
        }
        dag
    }
}

struct Tarjan<'a> {
    adj: &'a [Vec<usize>],
    disc: Vec<usize>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    time: usize,
    components: Vec<Vec<usize>>,
    metrics: Metrics,
}

impl<'a> Tarjan<'a> {
    fn new(adj: &'a [Vec<usize>]) -> Self {
        let n = adj.len();
        Self {
            adj,
            disc: vec![UNVISITED; n],
            low: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            time: 0,
            components: Vec::new(),
            metrics: Metrics::new(),
        }
    }

    fn enter(&mut self, u: usize) {
        self.metrics.dfs_visits += 1;
        self.disc[u] = self.time;
        self.low[u] = self.time;
        self.time += 1;
        self.stack.push(u);
        self.on_stack[u] = true;
    }

    fn search(&mut self, root: usize) {
        let mut calls: Vec<(usize, usize)> = vec![(root, 0)];
        self.enter(root);

        while let Some((u, next)) = calls.pop() {
            if let Some(&v) = self.adj[u].get(next) {
                calls.push((u, next + 1));
                self.metrics.edge_traversals += 1;
                if self.disc[v] == UNVISITED {
                    self.enter(v);
                    calls.push((v, 0));
                } else if self.on_stack[v] {
                    self.low[u] = self.low[u].min(self.disc[v]);
                }
                continue;
            }

            if self.low[u] == self.disc[u] {
                self.pop_component(u);
            }
            if let Some(&(parent, _)) = calls.last() {
                self.low[parent] = self.low[parent].min(self.low[u]);
            }
        }
    }

    fn pop_component(&mut self, root: usize) {
        let mut component = Vec::new();
        while let Some(v) = self.stack.pop() {
            self.on_stack[v] = false;
            component.push(v);
            if v == root {
                break;
            }
        }
        self.components.push(component);
    }
}

/// Find the strongly connected components of a directed graph
pub fn tarjan_scc(adj: &[Vec<usize>]) -> SccResult {
    let timer = Timer::start();
    let mut tarjan = Tarjan::new(adj);

    for root in 0..adj.len() {
        if tarjan.disc[root] == UNVISITED {
            tarjan.search(root);
        }
    }

    let mut metrics = tarjan.metrics;
    timer.stop(&mut metrics);

    let mut component_of = vec![0; adj.len()];
    for (idx, component) in tarjan.components.iter().enumerate() {
        for &v in component {
            component_of[v] = idx;
        }
    }

    log::trace!("tarjan: {} components, {}", tarjan.components.len(), metrics);

    SccResult {
        components: tarjan.components,
        component_of,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut components: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for c in components.iter_mut() {
            c.sort_unstable();
        }
        components.sort();
        components
    }

    #[test]
    fn test_acyclic_graph_has_singleton_components() {
        // 0 -> 1 -> 2, 0 -> 2
        let adj = vec![vec![1, 2], vec![2], vec![]];
        let scc = tarjan_scc(&adj);

        assert_eq!(scc.count(), 3);
        assert!(!scc.has_cycle());
        // Completion order: sinks first
        assert_eq!(scc.components, vec![vec![2], vec![1], vec![0]]);
        assert_eq!(scc.metrics.dfs_visits, 3);
        assert_eq!(scc.metrics.edge_traversals, 3);
    }

    #[test]
    fn test_cycle_collapses_into_one_component() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let adj = vec![vec![1], vec![2], vec![0, 3], vec![]];
        let scc = tarjan_scc(&adj);

        assert!(scc.has_cycle());
        assert_eq!(sorted(scc.components.clone()), vec![vec![0, 1, 2], vec![3]]);
        assert_eq!(scc.component_of[0], scc.component_of[1]);
        assert_eq!(scc.component_of[1], scc.component_of[2]);
        assert_ne!(scc.component_of[2], scc.component_of[3]);
    }

    #[test]
    fn test_components_partition_vertices() {
        let adj = vec![
            vec![1],
            vec![2, 3],
            vec![0],
            vec![4],
            vec![5],
            vec![3],
            vec![],
        ];
        let scc = tarjan_scc(&adj);

        let mut all: Vec<usize> = scc.components.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..7).collect::<Vec<_>>());
        assert_eq!(
            sorted(scc.components.clone()),
            vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]
        );
        assert_eq!(scc.metrics.dfs_visits, 7);
    }

    #[test]
    fn test_self_loop_is_single_component() {
        let adj = vec![vec![0]];
        let scc = tarjan_scc(&adj);
        assert_eq!(scc.components, vec![vec![0]]);
        assert!(scc.condensation(&adj)[0].is_empty());
    }

    #[test]
    fn test_condensation_merges_parallel_edges() {
        // {0,1} -> {2} twice, {2} -> {3}
        let adj = vec![vec![1, 2], vec![0, 2], vec![3], vec![]];
        let scc = tarjan_scc(&adj);
        let dag = scc.condensation(&adj);

        assert_eq!(dag.len(), scc.count());
        assert_eq!(dag.iter().map(Vec::len).sum::<usize>(), 2);

        let top = scc.component_of[0];
        let mid = scc.component_of[2];
        let bottom = scc.component_of[3];
        assert_eq!(dag[top], vec![mid]);
        assert_eq!(dag[mid], vec![bottom]);
        assert!(dag[bottom].is_empty());
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 200_000;
        let adj: Vec<Vec<usize>> = (0..n)
            .map(|i| if i + 1 < n { vec![i + 1] } else { vec![] })
            .collect();
        let scc = tarjan_scc(&adj);
        assert_eq!(scc.count(), n);
    }

    #[test]
    fn test_empty_graph() {
        let scc = tarjan_scc(&[]);
        assert_eq!(scc.count(), 0);
        assert!(scc.condensation(&[]).is_empty());
    }
}
