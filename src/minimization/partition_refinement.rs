use itertools::Itertools;
use tracing::trace;

use crate::{
    math::{OrderedMap, Partition},
    prelude::*,
};

/// Computes the coarsest partition of the states of `dfa` that separates terminal from
/// non-terminal states and is stable under every symbol, using Moore's algorithm.
///
/// Starting from the split into terminal and non-terminal states, every round groups the
/// states of each class by the classes their transitions lead to, one entry per symbol of the
/// alphabet. A missing transition is recorded as such and only agrees with another missing
/// transition. The rounds stop once no class is split anymore, which happens after at most
/// as many rounds as there are states.
pub(crate) fn moore_partition_refinement<S: Symbol>(dfa: &Automaton<S>) -> Partition<StateId> {
    let (terminal, nonterminal): (Vec<_>, Vec<_>) =
        dfa.states().partition(|q| dfa.is_terminal(*q));
    let mut partition = Partition::new([terminal, nonterminal]);

    for round in 1.. {
        let classes = partition.class_map();
        let mut refined: OrderedMap<(usize, Vec<Option<usize>>), Vec<StateId>> = OrderedMap::new();
        for q in dfa.states() {
            let signature = dfa
                .alphabet()
                .iter()
                .map(|sym| {
                    dfa.delta_on(q, Some(sym))
                        .next()
                        .map(|t| classes[&t.target()])
                })
                .collect_vec();
            refined.entry((classes[&q], signature)).or_default().push(q);
        }

        let refined = Partition::new(refined.into_values());
        trace!("refinement round {round} has {} classes", refined.size());
        if refined.size() == partition.size() {
            break;
        }
        partition = refined;
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::moore_partition_refinement;
    use crate::{math::Partition, prelude::*};

    #[test_log::test]
    fn refinement_separates_by_distance() {
        // q0 -a-> q1 -a-> q2 -a-> q3, only q3 is terminal, q3 loops
        let mut dfa: Automaton = Automaton::new();
        let q = (0..4).map(|i| dfa.add_state(i == 0, i == 3)).collect::<Vec<_>>();
        for i in 0..3 {
            dfa.add_edge(q[i], 'a', q[i + 1]).unwrap();
        }
        dfa.add_edge(q[3], 'a', q[3]).unwrap();

        let partition = moore_partition_refinement(&dfa);
        assert_eq!(partition.size(), 4);
        assert_eq!(
            partition,
            Partition::new([vec![q[0]], vec![q[1]], vec![q[2]], vec![q[3]]])
        );
    }

    #[test]
    fn missing_transitions_only_agree_with_missing_ones() {
        // p has no transition at all, r and s both loop on a, none is terminal
        let mut dfa: Automaton = Automaton::new();
        let p = dfa.add_state(true, false);
        let r = dfa.add_state(false, false);
        let s = dfa.add_state(false, false);
        dfa.add_edge(r, 'a', r).unwrap();
        dfa.add_edge(s, 'a', r).unwrap();

        let partition = moore_partition_refinement(&dfa);
        assert_eq!(partition, Partition::new([vec![p], vec![r, s]]));
    }
}
