use itertools::Itertools;
use tracing::{debug, trace};
use varisat::{CnfFormula, ExtendFormula, Lit};

use crate::graph::{Graph, NodeId};
use crate::logic::{at_least_one, at_most_one};
use crate::pool::{Atom, LiteralPool};

/// The base clause set for one (source, target) query, together with the pool that numbered its variables.
pub struct Encoding {
    /// Base clauses; blocking clauses are appended here during refinement.
    pub formula: CnfFormula,
    /// Numbering of arc and commander variables.
    pub pool: LiteralPool,
}

impl Encoding {
    /// The positive literal for the arc `from -> to`, if that arc was encoded.
    pub fn arc(&self, from: NodeId, to: NodeId) -> Option<Lit> {
        self.pool.get(Atom::arc(from, to)).map(|var| var.positive())
    }
}

fn add_clauses(formula: &mut CnfFormula, clauses: impl IntoIterator<Item=Vec<Lit>>) {
    clauses.into_iter().for_each(|clause| formula.add_clause(&clause));
}

/// Encode "the selected arcs form one simple path from `source` to `target`, plus any number of disjoint cycles".
///
/// # Logical setup
/// Every undirected edge `{u, v}` becomes two arcs, `u -> v` and `v -> u`, each with its own variable.
///
/// ## Vertices
/// An interior vertex V (neither `source` nor `target`) has exactly one outgoing and exactly one incoming selected arc.
/// `source` has exactly one outgoing and no incoming arc; `target` has exactly one incoming and no outgoing arc.
///
/// ## Edges
/// No edge is selected in both directions, which rules out two-cycles.
///
/// Any model is therefore a path from `source` to `target` with all remaining vertices covered by disjoint cycles of length three or more.
/// Nothing here rules those cycles out; the refinement loop in [`PathSolver`](crate::PathSolver) does that lazily.
pub fn encode(graph: &Graph, source: NodeId, target: NodeId) -> Encoding {
    let mut pool = LiteralPool::new();
    let mut formula = CnfFormula::new();

    for vertex in graph.nodes() {
        // let this vertex be V
        let outgoing = graph.neighbors(vertex)
            .map(|other| pool.id_of(Atom::arc(vertex, other)).positive())
            .collect_vec();
        let incoming = graph.neighbors(vertex)
            .map(|other| pool.id_of(Atom::arc(other, vertex)).positive())
            .collect_vec();

        if vertex == source {
            formula.add_clause(&at_least_one(outgoing.clone()));
            add_clauses(&mut formula, at_most_one(outgoing, &mut pool));
            // nothing enters the source
            add_clauses(&mut formula, incoming.into_iter().map(|lit| vec![!lit]));
        } else if vertex == target {
            formula.add_clause(&at_least_one(incoming.clone()));
            add_clauses(&mut formula, at_most_one(incoming, &mut pool));
            // nothing leaves the target
            add_clauses(&mut formula, outgoing.into_iter().map(|lit| vec![!lit]));
        } else {
            formula.add_clause(&at_least_one(outgoing.clone()));
            formula.add_clause(&at_least_one(incoming.clone()));
            add_clauses(&mut formula, at_most_one(outgoing, &mut pool));
            add_clauses(&mut formula, at_most_one(incoming, &mut pool));
        }

        trace!(vertex, clauses = formula.len(), "encoded vertex");
    }

    // no immediate backtracking
    for (u, v) in graph.edges() {
        let forward = pool.id_of(Atom::arc(u, v));
        let backward = pool.id_of(Atom::arc(v, u));
        formula.add_clause(&[forward.negative(), backward.negative()]);
    }

    debug!(source, target, vars = pool.len(), clauses = formula.len(), "built base encoding");

    Encoding { formula, pool }
}
