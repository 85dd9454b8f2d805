use std::collections::HashSet;

use unordered_pair::UnorderedPair;

use crate::error::GraphInvalidReason;
use crate::graph::{Graph, NodeId};

/// Incrementally assembles a [`Graph`] one undirected edge at a time.
///
/// The builder mutates itself while building but can be [`Clone`]d to save its state at some point.
/// Problems are recorded rather than returned immediately; once the builder is invalid, further calls do nothing.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    node_count: usize,
    // insertion order, so the built graph is reproducible
    edges: Vec<(NodeId, NodeId)>,
    seen: HashSet<UnorderedPair<NodeId>>,
    invalid_reasons: Vec<GraphInvalidReason>,
}

impl GraphBuilder {
    /// Start a builder for a graph on the nodes `0..node_count`.
    ///
    /// The builder is immediately invalid if `node_count < 2`.
    pub fn with_nodes(node_count: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if node_count < 2 {
            invalid_reasons.push(GraphInvalidReason::TooFewNodes(node_count));
        }

        Self {
            node_count,
            edges: Default::default(),
            seen: Default::default(),
            invalid_reasons,
        }
    }

    /// Connect `u` and `v`. Adding an edge which already exists, in either orientation, does nothing.
    ///
    /// May cause the builder to enter a [`NodeOutOfRange`](GraphInvalidReason::NodeOutOfRange) invalid state if either endpoint is out of range,
    /// or a [`SelfLoop`](GraphInvalidReason::SelfLoop) invalid state if `u == v`.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for node in [u, v] {
            if node >= self.node_count {
                self.invalid_reasons.push(GraphInvalidReason::NodeOutOfRange { node, node_count: self.node_count });
                return self;
            }
        }

        if u == v {
            self.invalid_reasons.push(GraphInvalidReason::SelfLoop(u));
            return self;
        }

        if self.seen.insert(UnorderedPair(u, v)) {
            self.edges.push((u, v));
        }

        self
    }

    /// Shorthand for multiple calls to [`Self::add_edge`], with the same conditions.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item=(NodeId, NodeId)>) -> &mut Self {
        for (u, v) in edges {
            self.add_edge(u, v);
        }

        self
    }

    /// Connect consecutive nodes in `nodes`, and the last back to the first.
    pub fn add_cycle(&mut self, nodes: &[NodeId]) -> &mut Self {
        if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
            self.add_edges(nodes.windows(2).map(|pair| (pair[0], pair[1])));
            self.add_edge(last, first);
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<GraphInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<GraphInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Graph`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`GraphInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Graph, &Vec<GraphInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Graph::with_edges(self.node_count, &self.edges))
    }
}
