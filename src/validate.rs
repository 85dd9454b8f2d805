use thiserror::Error;
use tracing::debug;

use crate::graph::{Graph, NodeId};

/// Why a node sequence is not a Hamiltonian path.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PathDefect {
    /// No nodes at all.
    #[error("path is empty")]
    Empty,
    /// The first node is not the source.
    #[error("path starts at {found}, expected {expected}")]
    WrongStart {
        /// The source.
        expected: NodeId,
        /// The first node of the path.
        found: NodeId,
    },
    /// The last node is not the target.
    #[error("path ends at {found}, expected {expected}")]
    WrongEnd {
        /// The target.
        expected: NodeId,
        /// The last node of the path.
        found: NodeId,
    },
    /// Names a node outside the graph.
    #[error("node {0} is out of range")]
    OutOfRange(NodeId),
    /// Visits a node twice.
    #[error("node {0} is visited more than once")]
    Repeated(NodeId),
    /// Distinct and in range, but some node is never visited.
    #[error("path visits {visited} of {node_count} nodes")]
    Incomplete {
        /// Number of nodes on the path.
        visited: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// Steps between two nodes with no edge between them.
    #[error("{0} and {1} are not adjacent")]
    NotAdjacent(NodeId, NodeId),
}

/// Check that `path` runs from `source` to `target` through every node of `graph` exactly once, using only edges of `graph`.
///
/// This knows nothing of the SAT encoding and is usable on its own as a reference check.
pub fn check_hamiltonian_path(graph: &Graph, path: &[NodeId], source: NodeId, target: NodeId) -> Result<(), PathDefect> {
    let node_count = graph.node_count();

    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Err(PathDefect::Empty);
    };
    if first != source {
        return Err(PathDefect::WrongStart { expected: source, found: first });
    }
    if last != target {
        return Err(PathDefect::WrongEnd { expected: target, found: last });
    }

    let mut visited = vec![false; node_count];
    for &node in path {
        match visited.get_mut(node) {
            None => return Err(PathDefect::OutOfRange(node)),
            Some(true) => return Err(PathDefect::Repeated(node)),
            Some(seen) => *seen = true,
        }
    }

    // distinct and in range, so this is the size of the visited set
    if path.len() != node_count {
        return Err(PathDefect::Incomplete { visited: path.len(), node_count });
    }

    match path.windows(2).find(|pair| !graph.contains_edge(pair[0], pair[1])) {
        Some(pair) => Err(PathDefect::NotAdjacent(pair[0], pair[1])),
        None => Ok(()),
    }
}

/// Boolean form of [`check_hamiltonian_path`]; the reason for any rejection is logged at debug level.
pub fn is_hamiltonian_path(graph: &Graph, path: &[NodeId], source: NodeId, target: NodeId) -> bool {
    match check_hamiltonian_path(graph, path, source, target) {
        Ok(()) => true,
        Err(defect) => {
            debug!(%defect, ?path, "rejected path");
            false
        }
    }
}
