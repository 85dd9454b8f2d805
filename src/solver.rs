use itertools::Itertools;
use tracing::{debug, error, info, trace};
use varisat::{ExtendFormula, Lit};

use crate::encoder::{encode, Encoding};
use crate::error::SolverFailure;
use crate::graph::{Graph, NodeId};
use crate::oracle::{Assignment, Oracle, VarisatOracle};
use crate::validate::check_hamiltonian_path;

/// The result of a query which ran to completion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// A Hamiltonian path from source to target, certified by [`check_hamiltonian_path`].
    Path(Vec<NodeId>),
    /// No Hamiltonian path from source to target exists.
    NoPath,
}

/// Progress reports from [`PathSolver::solve`]. These never influence the result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// About to ask the oracle for a model. `clauses` counts base and blocking clauses so far.
    Solving { iteration: usize, clauses: usize },
    /// The model held these cycles besides the path, and each has been forbidden.
    Blocked { iteration: usize, cycles: Vec<Vec<NodeId>> },
    /// The oracle proved there are no more models.
    Unsatisfiable { iteration: usize },
    /// The model was a Hamiltonian path.
    Found { iteration: usize },
}

/// Receives [`Event`]s while a query runs.
pub trait Observer {
    /// Called once per event, in order.
    fn notify(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

/// One model split into the walk from the source and the cycles covering everything else.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Decomposition {
    pub(crate) path: Vec<NodeId>,
    pub(crate) cycles: Vec<Vec<NodeId>>,
}

/// For every node, the heads of its selected outgoing arcs.
fn selected_arcs(graph: &Graph, encoding: &Encoding, model: &Assignment) -> Vec<Vec<NodeId>> {
    graph.nodes()
        .map(|from| graph.neighbors(from)
            .filter(|to| encoding.arc(from, *to).is_some_and(|lit| model.satisfies(lit)))
            .collect_vec())
        .collect_vec()
}

/// Follow selected arcs from the end of `walk` to unvisited nodes for as long as there is one.
fn extend_walk(selected: &[Vec<NodeId>], walk: &mut Vec<NodeId>, visited: &mut [bool]) {
    let Some(mut current) = walk.last().copied() else {
        return;
    };

    while let Some(&next) = selected[current].iter().find(|next| !visited[**next]) {
        visited[next] = true;
        walk.push(next);
        current = next;
    }
}

/// Split the selected arcs into the walk from `source` and the cycles over whatever that walk missed.
///
/// The path walk and the cycle scan share one visited set, so no node is ever traced twice.
pub(crate) fn decompose(selected: &[Vec<NodeId>], source: NodeId) -> Result<Decomposition, SolverFailure> {
    let mut visited = vec![false; selected.len()];

    let mut path = vec![source];
    visited[source] = true;
    extend_walk(selected, &mut path, &mut visited);

    if path.len() == selected.len() {
        return Ok(Decomposition { path, cycles: Vec::new() });
    }

    let mut cycles = Vec::new();
    for start in 0..selected.len() {
        if visited[start] {
            continue;
        }

        let mut cycle = vec![start];
        visited[start] = true;
        extend_walk(selected, &mut cycle, &mut visited);

        // the trail must come back round to where it started
        let closes = cycle.last().is_some_and(|last| selected[*last].contains(&start));
        if !closes {
            return Err(SolverFailure::UnclosedCycle(cycle));
        }

        cycles.push(cycle);
    }

    Ok(Decomposition { path, cycles })
}

/// The clause forbidding every arc of `cycle`, including the one closing it, from being selected together again.
fn blocking_clause(encoding: &Encoding, cycle: &[NodeId]) -> Result<Vec<Lit>, SolverFailure> {
    cycle.iter()
        .circular_tuple_windows()
        .map(|(from, to)| encoding.arc(*from, *to).map(|lit| !lit))
        .collect::<Option<Vec<Lit>>>()
        .ok_or_else(|| SolverFailure::UnclosedCycle(cycle.to_vec()))
}

/// Finds a Hamiltonian path between two nodes of a [`Graph`] by incremental SAT solving with cycle refinement.
/// Use [`Self::solve`] to run one query.
///
/// The oracle, clause set, and literal pool all belong to a single query, so `solve` consumes the solver.
pub struct PathSolver<'a, O = VarisatOracle>
where
    O: Oracle,
{
    graph: &'a Graph,
    oracle: O,
    observer: Option<Box<dyn Observer + 'a>>,
}

impl<'a> PathSolver<'a, VarisatOracle> {
    /// A solver over `graph` backed by [`VarisatOracle`].
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_oracle(graph, VarisatOracle::new())
    }
}

impl<'a> From<&'a Graph> for PathSolver<'a, VarisatOracle> {
    fn from(graph: &'a Graph) -> Self {
        Self::new(graph)
    }
}

impl<'a, O> PathSolver<'a, O>
where
    O: Oracle,
{
    /// A solver over `graph` backed by `oracle`, which should not hold any clauses yet.
    pub fn with_oracle(graph: &'a Graph, oracle: O) -> Self {
        Self {
            graph,
            oracle,
            observer: None,
        }
    }

    /// Report progress to `observer`.
    pub fn observe(mut self, observer: impl Observer + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn emit(&mut self, event: Event) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&event);
        }
    }

    fn check_query(&self, source: NodeId, target: NodeId) -> Result<(), SolverFailure> {
        let node_count = self.graph.node_count();
        if source >= node_count {
            return Err(SolverFailure::SourceOutOfRange { node: source, node_count });
        }
        if target >= node_count {
            return Err(SolverFailure::TargetOutOfRange { node: target, node_count });
        }
        if source == target {
            return Err(SolverFailure::SourceIsTarget(source));
        }

        Ok(())
    }

    /// Search for a Hamiltonian path from `source` to `target`.
    ///
    /// Returns [`Outcome::Path`] with a path certified by [`check_hamiltonian_path`], or [`Outcome::NoPath`] if none exists.
    /// Invalid queries fail before any encoding happens.
    ///
    /// # Refinement
    /// The base encoding (see [`encode`]) admits models made of a path plus stray cycles.
    /// Each round solves, walks the selected arcs from `source`, and if that walk misses some node,
    /// traces every leftover cycle and adds one clause per cycle forbidding exactly its arcs.
    /// Each such clause is violated by the model just seen, so no model repeats and the loop terminates.
    pub fn solve(mut self, source: NodeId, target: NodeId) -> Result<Outcome, SolverFailure> {
        self.check_query(source, target)?;
        let graph = self.graph;

        let mut encoding = encode(graph, source, target);
        self.oracle.load(&encoding.formula);

        let mut iteration = 0;
        loop {
            iteration += 1;
            debug!(iteration, clauses = encoding.formula.len(), "solving");
            self.emit(Event::Solving { iteration, clauses: encoding.formula.len() });

            let Some(model) = self.oracle.solve()? else {
                info!(source, target, iteration, "no Hamiltonian path");
                self.emit(Event::Unsatisfiable { iteration });
                return Ok(Outcome::NoPath);
            };

            let selected = selected_arcs(graph, &encoding, &model);
            let Decomposition { path, cycles } = decompose(&selected, source)?;

            if cycles.is_empty() {
                return match check_hamiltonian_path(graph, &path, source, target) {
                    Ok(()) => {
                        info!(source, target, iteration, "found Hamiltonian path");
                        self.emit(Event::Found { iteration });
                        Ok(Outcome::Path(path))
                    }
                    Err(defect) => {
                        error!(%defect, ?path, "walk spans every node but is not a Hamiltonian path");
                        Err(SolverFailure::EncodingInconsistency { path, defect })
                    }
                };
            }

            debug!(iteration, covered = path.len(), cycles = cycles.len(), "path misses nodes, blocking cycles");
            for cycle in &cycles {
                trace!(?cycle, "blocking cycle");
                let clause = blocking_clause(&encoding, cycle)?;
                encoding.formula.add_clause(&clause);
                self.oracle.add_clause(&clause);
            }

            self.emit(Event::Blocked { iteration, cycles });
        }
    }
}
