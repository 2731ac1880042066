use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::{
    math::{Bijection, OrderedMap},
    prelude::*,
};

/// The result of applying the subset construction to an automaton. Besides the deterministic
/// automaton itself, this remembers which set of original states each new state stands for.
pub struct SubsetConstruction<S: Symbol> {
    automaton: Automaton<S>,
    subsets: Bijection<StateSet, StateId>,
}

impl<S: Symbol> Clone for SubsetConstruction<S> {
    fn clone(&self) -> Self {
        let automaton = self.automaton.clone();
        let subsets = self
            .subsets
            .iter()
            .map(|(subset, q)| (subset.clone(), automaton.rebind(*q)))
            .collect();
        Self { automaton, subsets }
    }
}

impl<S: Symbol> SubsetConstruction<S> {
    /// Gives a reference to the deterministic automaton.
    pub fn automaton(&self) -> &Automaton<S> {
        &self.automaton
    }

    /// Consumes `self` and returns the deterministic automaton.
    pub fn into_automaton(self) -> Automaton<S> {
        self.automaton
    }

    /// Returns the set of original states that the state `q` of the deterministic automaton
    /// corresponds to.
    pub fn subset_of(&self, q: StateId) -> Option<&StateSet> {
        self.subsets.get_by_right(&q)
    }

    /// Returns the state of the deterministic automaton that corresponds to the given set of
    /// original states, if that set was explored.
    pub fn state_of(&self, subset: &StateSet) -> Option<StateId> {
        self.subsets.get_by_left(subset).copied()
    }
}

impl<S: Symbol> std::fmt::Debug for SubsetConstruction<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subset construction\n{}",
            self.automaton.build_transition_table(|q, decorated| {
                format!(
                    "{decorated} {}",
                    self.subset_of(q).map(|s| s.show()).unwrap_or_default()
                )
            })
        )
    }
}

impl<S: Symbol> Automaton<S> {
    /// Applies the subset construction, starting from the epsilon-closure of the initial
    /// states. The result is deterministic and accepts the same words as `self`. Only subsets
    /// that are reachable are explored, but their number may still be exponential in the size
    /// of `self`, see [`Automaton::determinize_with_budget`] for a bounded variant.
    pub fn determinize(&self) -> Automaton<S> {
        self.subset_construction().into_automaton()
    }

    /// Works like [`Automaton::determinize`], but gives up with
    /// [`AutomatonError::BudgetExhausted`] as soon as more than `limit` states would be
    /// created.
    pub fn determinize_with_budget(&self, limit: usize) -> Result<Automaton<S>, AutomatonError> {
        self.explore_subsets(Some(limit))
            .map(SubsetConstruction::into_automaton)
    }

    /// Works like [`Automaton::determinize`], but also returns the correspondence between
    /// new states and sets of original states.
    pub fn subset_construction(&self) -> SubsetConstruction<S> {
        match self.explore_subsets(None) {
            Ok(sc) => sc,
            Err(_) => unreachable!("an unbounded subset construction cannot run out of budget"),
        }
    }

    /// Groups the labeled transitions leaving `states` by their symbol and returns, for each
    /// symbol, the epsilon-closure of the states they arrive at.
    pub(crate) fn arrivals(&self, states: &StateSet) -> OrderedMap<S, StateSet> {
        let mut arrivals: OrderedMap<S, StateSet> = OrderedMap::new();
        for q in states {
            for t in self.delta(q) {
                if let Some(sym) = t.label() {
                    arrivals.entry(sym.clone()).or_default().insert(t.target());
                }
            }
        }
        arrivals
            .into_iter()
            .map(|(sym, targets)| (sym, self.closure(&targets)))
            .collect()
    }

    fn explore_subsets(&self, limit: Option<usize>) -> Result<SubsetConstruction<S>, AutomatonError> {
        let exhausted = |size: usize| limit.is_some_and(|l| size >= l);
        let accepting = |set: &StateSet| set.any(|q| self.is_terminal(q));

        let mut automaton = Automaton::new();
        let mut subsets = Bijection::new();
        if let Some(l) = limit.filter(|_| exhausted(0)) {
            return Err(AutomatonError::BudgetExhausted { limit: l });
        }

        let start = self.closure(&self.initial_set());
        let initial = automaton.add_state(true, accepting(&start));
        subsets.insert(start.clone(), initial);
        let mut queue = VecDeque::from([(start, initial)]);

        while let Some((current, source)) = queue.pop_front() {
            trace!("exploring subset {} as {}", current.show(), source.show());
            for (sym, reached) in self.arrivals(&current) {
                let target = match subsets.get_by_left(&reached) {
                    Some(p) => *p,
                    None => {
                        if exhausted(automaton.size()) {
                            let limit = automaton.size();
                            warn!("subset construction stopped after {limit} states");
                            return Err(AutomatonError::BudgetExhausted { limit });
                        }
                        let p = automaton.add_state(false, accepting(&reached));
                        subsets.insert(reached.clone(), p);
                        queue.push_back((reached, p));
                        p
                    }
                };
                automaton.link(source, Some(sym), target);
            }
        }

        debug!(
            "subset construction turned {} states into {}",
            self.size(),
            automaton.size()
        );
        Ok(SubsetConstruction {
            automaton,
            subsets,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{nondeterministic, words_up_to};

    #[test_log::test]
    fn subset_construction() {
        let mut nts: Automaton = Automaton::new();
        let q0 = nts.add_state(true, false);
        let q1 = nts.add_state(false, true);
        for (p, sym, q) in [(q0, 'a', q0), (q0, 'a', q1), (q0, 'b', q1), (q1, 'b', q1), (q1, 'a', q0)] {
            nts.add_edge(p, sym, q).unwrap();
        }

        let sc = nts.subset_construction();
        let dts = sc.automaton();
        assert_eq!(dts.size(), 3);
        assert!(dts.is_deterministic());
        assert_eq!(
            sc.subset_of(dts.initials().next().unwrap()),
            Some(&StateSet::singleton(q0))
        );
        assert!(sc.state_of(&StateSet::from_iter([q0, q1])).is_some());
        for w in words_up_to(&['a', 'b'], 6) {
            assert_eq!(nts.accepts(&w), dts.accepts(&w), "disagree on {}", w.show());
        }
    }

    #[test_log::test]
    fn silent_transitions_are_resolved() {
        let nfa = nondeterministic();
        let dfa = nfa.determinize();
        assert!(dfa.is_deterministic());
        assert!(dfa.accepts(""));
        for w in words_up_to(&['a', 'b'], 6) {
            assert_eq!(nfa.accepts(&w), dfa.accepts(&w), "disagree on {}", w.show());
        }
    }

    #[test]
    fn cloned_construction_refers_to_its_own_states() {
        let sc = nondeterministic().subset_construction();
        let copy = sc.clone();
        for q in copy.automaton().states() {
            assert!(copy.subset_of(q).is_some());
            assert!(sc.subset_of(q).is_none());
        }
        let start = copy.subset_of(copy.automaton().initials().next().unwrap()).unwrap();
        assert_eq!(copy.state_of(start), copy.automaton().initials().next());
    }

    #[test]
    fn subsets_memoized_by_value() {
        // both branches reach the same set {q1, q2} along different paths
        let mut aut: Automaton = Automaton::new();
        let q = (0..3).map(|i| aut.add_state(i == 0, i == 2)).collect::<Vec<_>>();
        aut.add_edge(q[0], 'a', q[1]).unwrap();
        aut.add_edge(q[0], 'a', q[2]).unwrap();
        aut.add_edge(q[1], 'b', q[1]).unwrap();
        aut.add_edge(q[1], 'b', q[2]).unwrap();
        aut.add_edge(q[2], 'b', q[1]).unwrap();
        let dfa = aut.determinize();
        assert_eq!(dfa.size(), 2);
    }

    #[test]
    fn budget_is_enforced() {
        let nfa = nondeterministic();
        let size = nfa.determinize().size();
        assert!(nfa.determinize_with_budget(size).is_ok());
        assert_eq!(
            nfa.determinize_with_budget(size - 1).unwrap_err(),
            AutomatonError::BudgetExhausted { limit: size - 1 }
        );
        assert!(nfa.determinize_with_budget(0).is_err());
    }

    #[test]
    fn empty_automaton_determinizes_to_rejecting_state() {
        let empty: Automaton = Automaton::new();
        let dfa = empty.determinize();
        assert_eq!(dfa.size(), 1);
        assert!(!dfa.accepts(""));
    }
}
