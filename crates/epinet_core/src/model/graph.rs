//! Undirected contact graphs over a dense node range
//!
//! Graph files arrive with arbitrary node labels; they are relabeled to
//! `0..n-1` on load so that trajectories (whose columns are positional)
//! and distance matrices can index nodes directly.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::GraphError;

/// Undirected contact graph with nodes `0..n-1`, stored as adjacency lists.
///
/// Self-loops and duplicate edges are dropped on construction. Neighbor
/// lists are sorted, which keeps neighbor iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactGraph {
    adjacency: Vec<Vec<u32>>,
    edge_count: usize,
}

impl ContactGraph {
    /// Build a graph from edges over an already-dense node range.
    ///
    /// `node_count` may exceed the largest endpoint; the extra nodes are
    /// isolated (degree zero).
    pub fn from_edges(node_count: usize, edges: &[(u32, u32)]) -> Result<Self, GraphError> {
        let mut adjacency = vec![Vec::new(); node_count];

        for &(a, b) in edges {
            for node in [a, b] {
                if node as usize >= node_count {
                    return Err(GraphError::NodeOutOfRange { node, node_count });
                }
            }
            if a == b {
                continue;
            }
            adjacency[a as usize].push(b);
            adjacency[b as usize].push(a);
        }

        let mut edge_count = 0;
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
            edge_count += neighbors.len();
        }
        // Each undirected edge appears in two adjacency lists
        edge_count /= 2;

        Ok(Self {
            adjacency,
            edge_count,
        })
    }

    /// Build a graph from edges over arbitrary hashable node labels.
    ///
    /// `labels` declares the full node set (including isolated nodes) and
    /// fixes the dense relabeling: label `labels[i]` becomes node `i`.
    /// Returns an error if an edge references an undeclared label.
    pub fn from_labeled_edges<L>(labels: &[L], edges: &[(L, L)]) -> Result<Self, GraphError>
    where
        L: Eq + Hash + std::fmt::Debug,
    {
        let mut index: FxHashMap<&L, u32> = FxHashMap::default();
        for (i, label) in labels.iter().enumerate() {
            index.insert(label, i as u32);
        }

        let mut dense = Vec::with_capacity(edges.len());
        for (a, b) in edges {
            let ai = *index
                .get(a)
                .ok_or_else(|| GraphError::UnknownLabel(format!("{a:?}")))?;
            let bi = *index
                .get(b)
                .ok_or_else(|| GraphError::UnknownLabel(format!("{b:?}")))?;
            dense.push((ai, bi));
        }

        Self::from_edges(labels.len(), &dense)
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of a node, sorted ascending
    #[must_use]
    pub fn neighbors(&self, node: u32) -> &[u32] {
        &self.adjacency[node as usize]
    }

    /// Degree of a node
    #[must_use]
    pub fn degree(&self, node: u32) -> usize {
        self.adjacency[node as usize].len()
    }
}
