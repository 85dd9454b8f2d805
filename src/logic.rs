use itertools::Itertools;
use varisat::Lit;

use crate::pool::LiteralPool;

/// Groups this small or smaller are encoded pairwise.
const PAIRWISE_LIMIT: usize = 4;

fn pairwise(lits: &[Lit]) -> impl Iterator<Item=Vec<Lit>> + '_ {
    // no two are true; (!A + !B) * (!A + !C) * ...
    lits.iter()
        .tuple_combinations()
        .map(|(a, b)| vec![!*a, !*b])
}

/// Clauses stating that at most one of `lits` is true.
///
/// Up to four literals are encoded pairwise. Longer inputs are split with a fresh commander variable `c` drawn from `pool`:
/// `at_most_one(first three + [!c])` followed by `at_most_one([c] + rest)`.
/// That yields a linear number of clauses at the cost of roughly `k / 3` auxiliary variables.
///
/// Nothing here says at least one literal is true; see [`at_least_one`].
pub fn at_most_one(lits: Vec<Lit>, pool: &mut LiteralPool) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::new();
    let mut pending = vec![lits];

    while let Some(group) = pending.pop() {
        if group.len() <= PAIRWISE_LIMIT {
            clauses.extend(pairwise(&group));
            continue;
        }

        let commander = pool.fresh();
        let (head, tail) = group.split_at(PAIRWISE_LIMIT - 1);

        let mut rest = Vec::with_capacity(tail.len() + 1);
        rest.push(commander.positive());
        rest.extend_from_slice(tail);

        let mut first = head.to_vec();
        first.push(commander.negative());

        // popped in reverse, so the head group is emitted before the rest
        pending.push(rest);
        pending.push(first);
    }

    clauses
}

/// A single clause stating that at least one of `lits` is true.
#[inline]
pub fn at_least_one(lits: Vec<Lit>) -> Vec<Lit> {
    // A + B + C + ...
    lits
}
