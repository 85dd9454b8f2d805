use varisat::{CnfFormula, ExtendFormula, Lit, Solver, Var};

use crate::error::SolverFailure;

/// A model returned by an [`Oracle`]: one boolean per variable.
///
/// Only meaningful for the solve that produced it; variables the oracle never saw read as false.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// The value of `var`.
    #[inline]
    pub fn value(&self, var: Var) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }

    /// Whether `lit` is true under this assignment.
    #[inline]
    pub fn satisfies(&self, lit: Lit) -> bool {
        self.value(lit.var()) == lit.is_positive()
    }
}

impl FromIterator<Lit> for Assignment {
    fn from_iter<T: IntoIterator<Item=Lit>>(iter: T) -> Self {
        let mut values = Vec::new();
        for lit in iter {
            if values.len() <= lit.index() {
                values.resize(lit.index() + 1, false);
            }
            values[lit.index()] = lit.is_positive();
        }

        Self { values }
    }
}

/// An incremental SAT backend.
///
/// Clauses handed to an oracle stay there for its whole lifetime; there is no way to retract one.
pub trait Oracle {
    /// Add every clause of `formula`.
    fn load(&mut self, formula: &CnfFormula);
    /// Add one more clause.
    fn add_clause(&mut self, clause: &[Lit]);
    /// Solve everything added so far, returning `Ok(None)` if that is unsatisfiable.
    fn solve(&mut self) -> Result<Option<Assignment>, SolverFailure>;
}

/// [`Oracle`] backed by an incremental [`varisat::Solver`].
pub struct VarisatOracle {
    solver: Solver<'static>,
}

impl VarisatOracle {
    /// A backend holding no clauses.
    pub fn new() -> Self {
        Self { solver: Solver::new() }
    }
}

impl Default for VarisatOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for VarisatOracle {
    fn load(&mut self, formula: &CnfFormula) {
        self.solver.add_formula(formula);
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.solver.add_clause(clause);
    }

    fn solve(&mut self) -> Result<Option<Assignment>, SolverFailure> {
        let satisfiable = self.solver.solve()
            .map_err(|err| SolverFailure::Backend(format!("{err:?}")))?;
        if !satisfiable {
            return Ok(None);
        }

        match self.solver.model() {
            Some(model) => Ok(Some(model.into_iter().collect())),
            None => Err(SolverFailure::Backend("satisfiable, but no model was produced".to_owned())),
        }
    }
}
