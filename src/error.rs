use thiserror::Error;

use crate::graph::NodeId;
use crate::validate::PathDefect;

/// Reasons a [`Graph`](crate::Graph) may be rejected during construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum GraphInvalidReason {
    /// Fewer than two nodes; no path between distinct endpoints can exist.
    #[error("graph has {0} node(s), at least 2 are required")]
    TooFewNodes(usize),
    /// An edge names a node outside `0..n`.
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge joins a node to itself.
    #[error("self-loop at node {0}")]
    SelfLoop(NodeId),
    /// `v` is listed as a neighbor of `u` but not the other way around.
    #[error("node {1} is adjacent to {0}, but {0} is not adjacent to {1}")]
    Asymmetric(NodeId, NodeId),
}

/// Reasons a [`PathSolver`](crate::PathSolver) may fail.
///
/// The absence of a Hamiltonian path is not a failure; see [`Outcome::NoPath`](crate::Outcome::NoPath).
#[derive(Clone, Debug, Error)]
pub enum SolverFailure {
    /// The source node is not in the graph.
    #[error("source {node} is out of range for a graph of {node_count} nodes")]
    SourceOutOfRange {
        /// The requested source.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The target node is not in the graph.
    #[error("target {node} is out of range for a graph of {node_count} nodes")]
    TargetOutOfRange {
        /// The requested target.
        node: NodeId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// Source and target coincide, which makes the degree constraints contradictory.
    #[error("source and target are both {0}")]
    SourceIsTarget(NodeId),
    /// A model decomposed into a walk spanning every node, yet the validator rejected it.
    /// This is a defect in the encoding or decomposition, never a statement about the graph.
    #[error("encoding inconsistency on walk {path:?}: {defect}")]
    EncodingInconsistency {
        /// The walk read off the model.
        path: Vec<NodeId>,
        /// Why the validator rejected it.
        defect: PathDefect,
    },
    /// A node left over after the path walk did not lie on a closed cycle of selected arcs.
    /// Like [`Self::EncodingInconsistency`], this can only come from a defective encoding.
    #[error("selected arcs from {0:?} do not close into a cycle")]
    UnclosedCycle(Vec<NodeId>),
    /// The SAT backend itself reported an error.
    #[error("SAT backend failure: {0}")]
    Backend(String),
}
