use std::collections::HashSet;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;

use crate::error::GraphInvalidReason;

/// Nodes are densely numbered from `0`.
pub type NodeId = usize;

/// A finite simple undirected graph on the nodes `0..n`, `n >= 2`.
///
/// Construct one with [`Graph::from_adjacency`] or a [`GraphBuilder`](crate::GraphBuilder).
/// Once built a graph is immutable; solvers only ever borrow it.
#[derive(Clone, Debug)]
pub struct Graph {
    // nodes are inserted in id order so neighbor iteration is reproducible
    inner: UnGraphMap<NodeId, ()>,
}

impl Graph {
    pub(crate) fn with_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Self {
        let mut inner = UnGraphMap::with_capacity(node_count, edges.len());
        for node in 0..node_count {
            inner.add_node(node);
        }
        for &(u, v) in edges {
            inner.add_edge(u, v, ());
        }

        Self { inner }
    }

    /// Build a graph from an adjacency list, where `adjacency[u]` lists the neighbors of `u`.
    ///
    /// The list must be symmetric, free of self-loops, and name only nodes in `0..adjacency.len()`.
    /// Repeated neighbors are tolerated and collapse into a single edge.
    pub fn from_adjacency(adjacency: &[Vec<NodeId>]) -> Result<Self, GraphInvalidReason> {
        let node_count = adjacency.len();
        if node_count < 2 {
            return Err(GraphInvalidReason::TooFewNodes(node_count));
        }

        let neighbor_sets = adjacency.iter()
            .map(|neighbors| neighbors.iter().copied().collect::<HashSet<NodeId>>())
            .collect_vec();

        let mut edges = Vec::new();
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                if v >= node_count {
                    return Err(GraphInvalidReason::NodeOutOfRange { node: v, node_count });
                }
                if v == u {
                    return Err(GraphInvalidReason::SelfLoop(u));
                }
                if !neighbor_sets[v].contains(&u) {
                    return Err(GraphInvalidReason::Asymmetric(u, v));
                }
                // each undirected edge is listed from both ends; keep the first sighting
                if u < v {
                    edges.push((u, v));
                }
            }
        }

        Ok(Self::with_edges(node_count, &edges))
    }

    /// Number of nodes, `n`.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// All node ids, in order.
    pub fn nodes(&self) -> impl Iterator<Item=NodeId> + '_ {
        self.inner.nodes()
    }

    /// Neighbors of `node`, in the order their edges were added.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item=NodeId> + '_ {
        self.inner.neighbors(node)
    }

    /// Whether `{u, v}` is an edge.
    #[inline]
    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.inner.contains_edge(u, v)
    }

    /// Every undirected edge exactly once.
    pub fn edges(&self) -> impl Iterator<Item=(NodeId, NodeId)> + '_ {
        self.inner.all_edges().map(|(u, v, _)| (u, v))
    }
}
