//! All-pairs shortest-path distances over a contact graph
//!
//! Unweighted BFS from every node, O(n * (n + E)). This is the dominant
//! cost of a session, so it runs once per distinct graph and the result is
//! cached for the whole timestep loop.

use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::ContactGraph;

/// Internal marker for pairs with no connecting path. Never escapes the
/// public API: [`DistanceMatrix::get`] answers `None` for such pairs.
const UNREACHABLE: u32 = u32::MAX;

/// Symmetric n x n matrix of shortest-path hop counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    node_count: usize,
    hops: Vec<u32>,
}

impl DistanceMatrix {
    /// Compute all-pairs shortest paths by BFS from every node.
    ///
    /// BFS sources are independent, so they run in parallel under the
    /// `parallel` feature.
    #[must_use]
    pub fn from_graph(graph: &ContactGraph) -> Self {
        let node_count = graph.node_count();

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<u32>> = (0..node_count)
            .into_par_iter()
            .map(|source| bfs_hops(graph, source as u32))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<u32>> = (0..node_count)
            .map(|source| bfs_hops(graph, source as u32))
            .collect();

        let mut hops = Vec::with_capacity(node_count * node_count);
        for row in rows {
            hops.extend(row);
        }

        Self { node_count, hops }
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Hop count between two nodes, or `None` if no path connects them.
    ///
    /// Distance to self is always `Some(0)`.
    #[must_use]
    pub fn get(&self, a: usize, b: usize) -> Option<u32> {
        let hops = self.hops[a * self.node_count + b];
        if hops == UNREACHABLE { None } else { Some(hops) }
    }
}

/// Hop counts from one source to every node, `UNREACHABLE` where no path exists
fn bfs_hops(graph: &ContactGraph, source: u32) -> Vec<u32> {
    let mut hops = vec![UNREACHABLE; graph.node_count()];
    hops[source as usize] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        let next = hops[node as usize] + 1;
        for &neighbor in graph.neighbors(node) {
            if hops[neighbor as usize] == UNREACHABLE {
                hops[neighbor as usize] = next;
                queue.push_back(neighbor);
            }
        }
    }

    hops
}
