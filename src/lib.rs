#![warn(missing_docs)]

//! # `hamsat`
//!
//! Decide whether a [Hamiltonian path](https://en.wikipedia.org/wiki/Hamiltonian_path) joins two given nodes of a simple undirected graph, and find one if so.
//! Begin by building a [`Graph`] with a [`GraphBuilder`] or [`Graph::from_adjacency`],
//! then hand it to a [`PathSolver`] and call [`solve()`](PathSolver::solve) with the two endpoints.
//!
//! # Internals
//! The search is expressed as a Boolean satisfiability problem (a "SAT") and handed to an incremental solver, [`varisat`] by default.
//! Encoding "visits every node exactly once" directly is expensive, so we encode something weaker and repair it lazily,
//! much like subtour elimination for the travelling salesman problem.
//!
//! A high level overview is as follows:
//!
//! Every undirected edge `{u, v}` is split into the two arcs `u -> v` and `v -> u`, each a variable.
//! We make the following assertions in SAT form:
//! 1. The source has exactly one outgoing arc and no incoming arc; the target, exactly one incoming arc and no outgoing arc.
//! 2. Every other node has exactly one incoming and exactly one outgoing arc.
//! "At most one" is stated with a commander encoding (see [`at_most_one`]), which stays linear in the degree.
//! 3. No edge is used in both directions.
//!
//! Any model of this is a path from source to target plus zero or more disjoint cycles through the nodes the path skipped.
//! If there are no cycles, the path is Hamiltonian; it is checked independently by [`check_hamiltonian_path`] and returned.
//! Otherwise one clause per cycle forbids that exact set of arcs, and we solve again.
//! The solver keeps what it has learned between rounds, and since every round removes at least one model, the loop terminates.

pub use builder::GraphBuilder;
pub use encoder::{encode, Encoding};
pub use error::{GraphInvalidReason, SolverFailure};
pub use graph::{Graph, NodeId};
pub use logic::{at_least_one, at_most_one};
pub use oracle::{Assignment, Oracle, VarisatOracle};
pub use pool::{Atom, LiteralPool};
pub use solver::{Event, Observer, Outcome, PathSolver};
pub use validate::{check_hamiltonian_path, is_hamiltonian_path, PathDefect};

pub mod builder;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod graph;
pub(crate) mod logic;
pub(crate) mod oracle;
pub(crate) mod pool;
pub(crate) mod solver;
pub(crate) mod validate;
