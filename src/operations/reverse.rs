use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Builds the reversal of `self`: every transition `(p, a, q)` becomes `(q, a, p)` and
    /// the initial and terminal states swap roles. The result accepts precisely the mirror
    /// images of the words accepted by `self`.
    pub fn reverse(&self) -> Automaton<S> {
        let mut out = Automaton::with_capacity(self.size());
        let map = self
            .states()
            .map(|q| out.add_copy(&self.states[q.index()], self.is_terminal(q), self.is_initial(q)))
            .collect::<Vec<_>>();
        for t in self.transitions() {
            out.link(map[t.target().index()], t.label().cloned(), map[t.source().index()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{nondeterministic, word_ab, words_up_to};

    #[test]
    fn reversal_mirrors_words() {
        let rev = word_ab().reverse();
        assert!(rev.accepts("ba"));
        assert!(!rev.accepts("ab"));

        let aut = nondeterministic();
        let rev = aut.reverse();
        assert_eq!(rev.size(), aut.size());
        assert_eq!(rev.transition_count(), aut.transition_count());
        for w in words_up_to(&['a', 'b'], 5) {
            assert_eq!(rev.accepts(&w), aut.accepts(w.reversed()));
        }
    }

    #[test]
    fn reversal_is_an_involution() {
        let aut = nondeterministic();
        let back = aut.reverse().reverse();
        for (p, q) in aut.states().zip(back.states()) {
            assert_eq!(aut.is_initial(p), back.is_initial(q));
            assert_eq!(aut.is_terminal(p), back.is_terminal(q));
            assert_eq!(aut.delta(p).count(), back.delta(q).count());
        }
    }
}
