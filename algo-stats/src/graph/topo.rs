//! Topological ordering (Kahn and depth-first)

use crate::metrics::{Metrics, Timer};
use std::collections::VecDeque;

/// A topological order together with the counters collected computing it
#[derive(Debug, Clone)]
pub struct TopoOrder {
    pub order: Vec<usize>,
    pub metrics: Metrics,
}

impl TopoOrder {
    /// True if every one of `n` vertices was ordered (no cycle blocked the sort)
    pub fn is_complete(&self, n: usize) -> bool {
        self.order.len() == n
    }
}

/// Kahn's algorithm: repeatedly emit a vertex with no remaining in-edges
///
/// Vertices on or behind a cycle never reach in-degree zero, so a cyclic
/// input yields a partial order.
pub fn kahn_sort(adj: &[Vec<usize>]) -> TopoOrder {
    let timer = Timer::start();
    let mut metrics = Metrics::new();
    let n = adj.len();

    let mut in_degree = vec![0usize; n];
    for successors in adj {
        for &v in successors {
            in_degree[v] += 1;
        }
    }

    let mut queue = VecDeque::new();
    for (v, &degree) in in_degree.iter().enumerate() {
        if degree == 0 {
            queue.push_back(v);
            metrics.queue_pushes += 1;
        }
    }

    let mut order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        metrics.queue_pops += 1;
        order.push(u);

        for &v in &adj[u] {
            metrics.edge_traversals += 1;
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
                metrics.queue_pushes += 1;
            }
        }
    }

    timer.stop(&mut metrics);
    if order.len() < n {
        log::debug!("kahn: cycle left {} of {} vertices unordered", n - order.len(), n);
    }
    TopoOrder { order, metrics }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first topological sort; `None` if the graph has a cycle
pub fn dfs_sort(adj: &[Vec<usize>]) -> Option<TopoOrder> {
    let timer = Timer::start();
    let mut metrics = Metrics::new();
    let n = adj.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut finished = Vec::with_capacity(n);

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        let mut calls: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::InProgress;
        metrics.dfs_visits += 1;

        while let Some((u, next)) = calls.pop() {
            if let Some(&v) = adj[u].get(next) {
                calls.push((u, next + 1));
                metrics.edge_traversals += 1;
                match marks[v] {
                    Mark::Unvisited => {
                        marks[v] = Mark::InProgress;
                        metrics.dfs_visits += 1;
                        calls.push((v, 0));
                    }
                    Mark::InProgress => {
                        log::debug!("dfs sort: back edge {} -> {}", u, v);
                        return None;
                    }
                    Mark::Done => {}
                }
                continue;
            }

            marks[u] = Mark::Done;
            finished.push(u);
        }
    }

    finished.reverse();
    timer.stop(&mut metrics);
    Some(TopoOrder {
        order: finished,
        metrics,
    })
}

/// Flatten an order over components into an order over their vertices
pub fn expand_components(components: &[Vec<usize>], order: &[usize]) -> Vec<usize> {
    order
        .iter()
        .flat_map(|&c| components[c].iter().copied())
        .collect()
}
