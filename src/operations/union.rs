use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Builds an automaton accepting every word accepted by `self` or by `other`. Both are
    /// copied side by side into a fresh automaton without merging any states, so the result
    /// has the initial states of both and is in general nondeterministic.
    pub fn union(&self, other: &Automaton<S>) -> Automaton<S> {
        let mut out = Automaton::with_capacity(self.size() + other.size());
        let keep = |state: &State| (state.is_initial(), state.is_terminal());
        out.embed(self, keep);
        out.embed(other, keep);
        out
    }
}
