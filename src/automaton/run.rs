use tracing::trace;

use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Returns the set of initial states.
    pub fn initial_set(&self) -> StateSet {
        self.initials().collect()
    }

    /// Returns the set of terminal states.
    pub fn terminal_set(&self) -> StateSet {
        self.terminals().collect()
    }

    /// Computes the epsilon-closure of `states`, i.e. all states that can be reached from some
    /// state in `states` by taking only silent transitions (including `states` themselves).
    /// States not belonging to `self` are dropped.
    pub fn closure(&self, states: &StateSet) -> StateSet {
        let mut closed: StateSet = states.iter().filter(|q| self.owns(*q)).collect();
        let mut frontier = closed.iter().collect::<Vec<_>>();
        while let Some(q) = frontier.pop() {
            for t in self.delta_on(q, None) {
                if closed.insert(t.target()) {
                    frontier.push(t.target());
                }
            }
        }
        closed
    }

    /// Computes the states that are reached from the epsilon-closure of `states` by taking a
    /// single transition labeled `sym`. The returned set is not closed itself, it is empty if
    /// no transition matches.
    pub fn step(&self, states: &StateSet, sym: &S) -> StateSet {
        self.closure(states)
            .iter()
            .flat_map(|q| self.delta_on(q, Some(sym)).map(|t| t.target()))
            .collect()
    }

    /// Computes the (epsilon-closed) set of states that are reached when reading `word` from
    /// `states`.
    pub fn steps<W: FiniteWord<S>>(&self, states: &StateSet, word: W) -> StateSet {
        let mut current = self.closure(states);
        for sym in word.symbols() {
            if current.is_empty() {
                break;
            }
            current = self.closure(&self.step(&current, &sym));
        }
        current
    }

    /// Returns whether `word` is accepted, that is whether some terminal state is reached
    /// when reading `word` from the initial states.
    pub fn accepts<W: FiniteWord<S>>(&self, word: W) -> bool {
        self.steps(&self.initial_set(), word)
            .any(|q| self.is_terminal(q))
    }

    /// Returns whether the empty word is accepted.
    pub fn accepts_empty_word(&self) -> bool {
        self.closure(&self.initial_set())
            .any(|q| self.is_terminal(q))
    }

    /// Reads `word` from `start` and records the (epsilon-closed) set of states reached after
    /// each symbol. If some prefix leads nowhere, the returned sequence ends with an empty set
    /// and the remaining symbols are not read, so the result may be shorter than `word`.
    pub fn trace<W: FiniteWord<S>>(&self, word: W, start: &StateSet) -> Vec<StateSet> {
        let mut current = self.closure(start);
        let mut out = Vec::with_capacity(word.len());
        for sym in word.symbols() {
            current = self.closure(&self.step(&current, &sym));
            let stuck = current.is_empty();
            out.push(current.clone());
            if stuck {
                trace!("run got stuck on symbol {}", sym.show());
                break;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::nondeterministic;

    #[test]
    fn closure_is_a_fixpoint() {
        let mut aut: Automaton = Automaton::new();
        let qs = (0..5).map(|i| aut.add_state(i == 0, i == 4)).collect::<Vec<_>>();
        aut.add_silent(qs[0], qs[1]).unwrap();
        aut.add_silent(qs[1], qs[2]).unwrap();
        aut.add_silent(qs[2], qs[0]).unwrap();
        aut.add_edge(qs[2], 'a', qs[3]).unwrap();
        aut.add_silent(qs[3], qs[4]).unwrap();

        let closed = aut.closure(&StateSet::singleton(qs[0]));
        assert_eq!(closed, StateSet::from_iter([qs[0], qs[1], qs[2]]));
        assert_eq!(aut.closure(&closed), closed);

        let stepped = aut.step(&StateSet::singleton(qs[0]), &'a');
        assert_eq!(stepped, StateSet::singleton(qs[3]));
        assert_eq!(aut.closure(&stepped), StateSet::from_iter([qs[3], qs[4]]));
        assert!(aut.step(&StateSet::singleton(qs[0]), &'b').is_empty());
        assert!(aut.accepts("a"));
        assert!(!aut.accepts(""));
    }

    #[test]
    fn queries_are_total() {
        let empty: Automaton = Automaton::new();
        assert!(!empty.accepts(""));
        assert!(!empty.accepts("abc"));
        assert!(empty.closure(&StateSet::new()).is_empty());

        let aut = nondeterministic();
        assert!(!aut.accepts("xyz"));
        assert!(aut.steps(&StateSet::new(), "ab").is_empty());

        let other: Automaton = Automaton::epsilon();
        let foreign = other.initial_set();
        assert!(aut.closure(&foreign).is_empty());
    }

    #[test]
    fn trace_stops_at_rejection() {
        let aut = Automaton::word("abc");
        let start = aut.initial_set();

        let full = aut.trace("abc", &start);
        assert_eq!(full.len(), 3);
        assert!(full.iter().all(|set| set.len() == 1));
        assert!(full[2].any(|q| aut.is_terminal(q)));

        let stuck = aut.trace("axcc", &start);
        assert_eq!(stuck.len(), 2);
        assert!(stuck[1].is_empty());
    }
}
