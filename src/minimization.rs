pub(crate) mod partition_refinement;

use tracing::debug;

use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Returns the minimal deterministic automaton that accepts the same words as `self`.
    ///
    /// The input is determinized and sink-completed over its own alphabet first, so that the
    /// partition refinement (Moore's algorithm) only ever compares states that have exactly one
    /// transition per symbol. Each class of the stable partition becomes one state of the
    /// quotient, which takes its flags and transitions from a representative. Finally the class
    /// of states that cannot reach a terminal state, among them the sink, is pruned away, so the
    /// result never has more states than [`Automaton::determinize`] produces.
    pub fn minimize(&self) -> Automaton<S> {
        let dfa = self.determinize().complete(Completion::Sink);
        let partition = partition_refinement::moore_partition_refinement(&dfa);
        let classes = partition.class_map();

        let mut quotient = Automaton::with_capacity(partition.size());
        let blocks = partition
            .iter()
            .map(|class| {
                quotient.add_state(
                    class.iter().any(|q| dfa.is_initial(*q)),
                    class.iter().any(|q| dfa.is_terminal(*q)),
                )
            })
            .collect::<Vec<_>>();
        for (block, class) in blocks.iter().zip(partition.iter()) {
            let Some(&representative) = class.first() else {
                continue;
            };
            for t in dfa.delta(representative) {
                quotient.link(*block, t.label().cloned(), blocks[classes[&t.target()]]);
            }
        }

        let minimal = quotient.prune();
        debug!(
            "minimization turned {} states into {}",
            self.size(),
            minimal.size()
        );
        minimal
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{nondeterministic, word_ab, words_up_to};

    #[test_log::test]
    fn merges_equivalent_states() {
        // p and r both go to q on a and to r on b
        let dfa = Builder::default()
            .from("p")
            .on('a')
            .go("q")
            .on('a')
            .loops()
            .on('b')
            .go("r")
            .on('b')
            .loops()
            .on('a')
            .go("q")
            .from("p")
            .on('b')
            .go("r")
            .initial("p")
            .terminal("q")
            .build();
        assert!(dfa.is_deterministic());
        let min = dfa.minimize();
        assert_eq!(min.size(), 2);
        assert!(min.is_deterministic());
        for w in words_up_to(&['a', 'b'], 6) {
            assert_eq!(dfa.accepts(&w), min.accepts(&w), "disagree on {}", w.show());
        }
    }

    #[test]
    fn factor_language() {
        let nfa = nondeterministic();
        let min = nfa.minimize();
        assert_eq!(nfa.determinize().size(), 5);
        assert_eq!(min.size(), 4);
        for w in words_up_to(&['a', 'b'], 6) {
            assert_eq!(nfa.accepts(&w), min.accepts(&w), "disagree on {}", w.show());
        }
    }

    #[test]
    fn universal_language_collapses() {
        let mut aut: Automaton = Automaton::new();
        let q0 = aut.add_state(true, true);
        let q1 = aut.add_state(false, true);
        aut.add_edge(q0, 'a', q1).unwrap();
        aut.add_edge(q1, 'a', q0).unwrap();
        aut.add_edge(q0, 'b', q0).unwrap();
        aut.add_edge(q1, 'b', q1).unwrap();
        let min = aut.minimize();
        assert_eq!(min.size(), 1);
        assert!(min.accepts(""));
        assert!(min.accepts("abba"));
    }

    #[test]
    fn sink_is_pruned() {
        let aut = word_ab();
        let min = aut.minimize();
        assert_eq!(min.size(), 3);
        assert!(min.size() <= aut.determinize().size());
        assert!(min.accepts("ab"));
        assert!(!min.accepts("abb"));
    }

    #[test]
    fn empty_language_minimizes_to_nothing() {
        let mut aut: Automaton = Automaton::new();
        let q = aut.add_state(true, false);
        aut.add_edge(q, 'a', q).unwrap();
        assert_eq!(aut.minimize().size(), 0);
    }
}
