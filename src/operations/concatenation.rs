use tracing::debug;

use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Builds an automaton accepting every word `uv` such that `u` is accepted by `self` and
    /// `v` is accepted by `other`.
    ///
    /// Both operands are normalized first. The terminal state of the left one and the initial
    /// state of the right one are then merged into a single junction state, through which every
    /// accepting path of the result passes. The junction is initial if `self` accepts the empty
    /// word and terminal if both operands do.
    ///
    /// If one of the operands is the canonical empty-word automaton (see
    /// [`Automaton::epsilon`]), a clone of the other operand is returned. Like every clone it
    /// is a new automaton, handles of the operand do not refer to its states.
    pub fn concatenate(&self, other: &Automaton<S>) -> Automaton<S> {
        if self.is_epsilon() {
            return other.clone();
        }
        if other.is_epsilon() {
            return self.clone();
        }
        let (Some(left), Some(right)) = (self.normalize(), other.normalize()) else {
            debug!("concatenation with the empty language");
            return Automaton::new();
        };
        let (left_empty, right_empty) = (self.accepts_empty_word(), other.accepts_empty_word());

        let (la, ra) = (left.automaton(), right.automaton());
        let mut out = Automaton::with_capacity(la.size() + ra.size() - 1);
        let junction = out.add_state(left_empty, left_empty && right_empty);

        let lmap = la
            .states()
            .map(|q| {
                if q == left.terminal() {
                    junction
                } else {
                    out.add_copy(&la.states[q.index()], q == left.initial(), false)
                }
            })
            .collect::<Vec<_>>();
        let rmap = ra
            .states()
            .map(|q| {
                if q == right.initial() {
                    junction
                } else {
                    out.add_copy(&ra.states[q.index()], false, q == right.terminal())
                }
            })
            .collect::<Vec<_>>();

        for t in la.transitions() {
            out.link(lmap[t.source().index()], t.label().cloned(), lmap[t.target().index()]);
        }
        for t in ra.transitions() {
            out.link(rmap[t.source().index()], t.label().cloned(), rmap[t.target().index()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;
    use crate::tests::{nondeterministic, single_a, word_ab, words_up_to};

    fn concatenation_accepts(left: &Automaton, right: &Automaton, w: &[char]) -> bool {
        (0..=w.len()).any(|i| left.accepts(&w[..i]) && right.accepts(&w[i..]))
    }

    #[test]
    fn a_then_ab() {
        let cat = single_a().concatenate(&word_ab());
        assert!(cat.accepts("aab"));
        for rejected in ["ab", "a", "", "aabb", "aba"] {
            assert!(!cat.accepts(rejected));
        }
    }

    #[test]
    fn splits_are_found() {
        let operands = [single_a(), word_ab(), nondeterministic(), Automaton::word("ba")];
        for (left, right) in operands.iter().cartesian_product(operands.iter()) {
            let cat = left.concatenate(right);
            for w in words_up_to(&['a', 'b'], 5) {
                assert_eq!(
                    cat.accepts(&w),
                    concatenation_accepts(left, right, &w),
                    "disagree on {}",
                    w.show()
                );
            }
        }
    }

    #[test]
    fn epsilon_is_neutral() {
        let ab = word_ab();
        let eps = Automaton::epsilon();
        let left = eps.concatenate(&ab);
        let right = ab.concatenate(&eps);
        assert_eq!(left.size(), ab.size());
        assert_eq!(right.transition_count(), ab.transition_count());
        assert!(left.accepts("ab") && right.accepts("ab"));
    }

    #[test]
    fn epsilon_identity_returns_a_new_automaton() {
        let mut ab = word_ab();
        let mut cat = Automaton::epsilon().concatenate(&ab);
        let p = ab.add_state(false, true);
        let q = cat.add_state(false, true);
        let s2 = cat.terminals().next().unwrap();
        assert_eq!(
            cat.add_edge(s2, 'c', p),
            Err(AutomatonError::InvalidReference { state: p })
        );
        assert!(cat.add_edge(s2, 'c', q).unwrap());
        assert!(cat.accepts("abc"));
        assert!(!ab.accepts("abc"));
    }

    #[test]
    fn empty_word_in_both_operands() {
        let left = nondeterministic();
        let right = Automaton::word("b").union(&Automaton::epsilon());
        let cat = left.concatenate(&right);
        assert!(cat.accepts(""));
        assert!(cat.accepts("b"));
        assert!(cat.accepts("abb"));
    }

    #[test]
    fn empty_language_absorbs() {
        let mut nothing: Automaton = Automaton::new();
        nothing.add_state(true, false);
        let cat = word_ab().concatenate(&nothing);
        assert!(cat.is_empty_language());
    }
}
