use std::collections::HashMap;

use varisat::Var;

use crate::graph::NodeId;

/// Something the encoding needs a boolean variable for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Atom {
    /// The directed edge `from -> to` is selected.
    Arc {
        /// Tail of the arc.
        from: NodeId,
        /// Head of the arc.
        to: NodeId,
    },
    /// Auxiliary variable introduced by the commander at-most-one encoding.
    Commander(usize),
}

impl Atom {
    /// Shorthand for [`Atom::Arc`].
    #[inline]
    pub fn arc(from: NodeId, to: NodeId) -> Self {
        Self::Arc { from, to }
    }
}

/// Hands out one SAT variable per [`Atom`], allocating lazily.
///
/// Variables are numbered consecutively from index 0 (DIMACS `1`) in order of first reference and are never reused.
#[derive(Clone, Debug, Default)]
pub struct LiteralPool {
    vars: HashMap<Atom, Var>,
    commanders: usize,
}

impl LiteralPool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// The variable for `atom`, allocating one on first reference.
    pub fn id_of(&mut self, atom: Atom) -> Var {
        let next = self.vars.len();
        *self.vars.entry(atom).or_insert_with(|| Var::from_index(next))
    }

    /// The variable for `atom`, if it has been referenced before.
    pub fn get(&self, atom: Atom) -> Option<Var> {
        self.vars.get(&atom).copied()
    }

    /// Allocate a brand-new commander variable.
    pub fn fresh(&mut self) -> Var {
        let atom = Atom::Commander(self.commanders);
        self.commanders += 1;
        self.id_of(atom)
    }

    /// Number of variables allocated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variable has been allocated yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
