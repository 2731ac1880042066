use std::collections::VecDeque;

use bit_set::BitSet;

use crate::{math::Set, prelude::*};

impl<S: Symbol> Automaton<S> {
    fn reachable_over<'a, F, I>(&'a self, from: &StateSet, mut edges: F) -> StateSet
    where
        F: FnMut(StateId) -> I,
        I: Iterator<Item = StateId> + 'a,
    {
        let mut seen = BitSet::with_capacity(self.size());
        let mut queue = from
            .iter()
            .filter(|q| self.owns(*q) && seen.insert(q.index()))
            .collect::<VecDeque<_>>();
        let mut out = queue.iter().copied().collect::<StateSet>();
        while let Some(q) = queue.pop_front() {
            for p in edges(q) {
                if seen.insert(p.index()) {
                    out.insert(p);
                    queue.push_back(p);
                }
            }
        }
        out
    }

    /// Returns the states reachable from `from` by following transitions forward, silent
    /// ones included. The states in `from` are reachable themselves.
    pub fn accessible_states(&self, from: &StateSet) -> StateSet {
        self.reachable_over(from, |q| self.delta(q).map(|t| t.target()))
    }

    /// Returns the states from which some state of `from` can be reached.
    pub fn co_accessible_states(&self, from: &StateSet) -> StateSet {
        self.reachable_over(from, |q| self.delta_inverse(q).map(|t| t.source()))
    }

    /// Returns true if no word is accepted.
    pub fn is_empty_language(&self) -> bool {
        !self
            .accessible_states(&self.initial_set())
            .any(|q| self.is_terminal(q))
    }

    /// Tries to find a word that is accepted. Among all accepted words, the shortest one is
    /// returned, ties being broken by the order of the symbols. Returns `None` if the accepted
    /// language is empty.
    pub fn give_word(&self) -> Option<Vec<S>> {
        let start = self.closure(&self.initial_set());
        let mut seen = Set::from_iter([start.clone()]);
        let mut queue = VecDeque::from([(vec![], start)]);
        while let Some((word, current)) = queue.pop_front() {
            if current.any(|q| self.is_terminal(q)) {
                return Some(word);
            }
            for sym in self.alphabet() {
                let next = self.closure(&self.step(&current, sym));
                if !next.is_empty() && seen.insert(next.clone()) {
                    let mut extended = word.clone();
                    extended.push(sym.clone());
                    queue.push_back((extended, next));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{nondeterministic, word_ab};

    #[test]
    fn accessible_and_co_accessible() {
        let mut aut = word_ab();
        let s = |name: &str, aut: &Automaton| aut.state_by_name(name).unwrap();
        let dead = aut.add_state(false, false);
        let lonely = aut.add_state(false, false);
        aut.add_edge(s("s1", &aut), 'c', dead).unwrap();
        aut.add_edge(lonely, 'c', s("s2", &aut)).unwrap();

        let acc = aut.accessible_states(&aut.initial_set());
        assert_eq!(acc.len(), 4);
        assert!(acc.contains(&dead) && !acc.contains(&lonely));

        let coacc = aut.co_accessible_states(&aut.terminal_set());
        assert_eq!(coacc.len(), 4);
        assert!(coacc.contains(&lonely) && !coacc.contains(&dead));
    }

    #[test]
    fn witnesses() {
        assert_eq!(word_ab().give_word(), Some(vec!['a', 'b']));
        assert_eq!(nondeterministic().give_word(), Some(vec![]));

        let mut aut: Automaton = Automaton::new();
        let q0 = aut.add_state(true, false);
        let q1 = aut.add_state(false, true);
        aut.add_edge(q0, 'a', q0).unwrap();
        assert!(aut.is_empty_language());
        assert_eq!(aut.give_word(), None);
        aut.add_edge(q0, 'b', q1).unwrap();
        assert!(!aut.is_empty_language());
        assert_eq!(aut.give_word(), Some(vec!['b']));
    }
}
