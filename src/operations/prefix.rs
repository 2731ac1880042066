use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Copies `self` and makes every state terminal. Applied to a pruned automaton, see
    /// [`Automaton::prune`], this accepts exactly the prefixes of the words that `self` accepts.
    /// States that cannot reach a terminal state also become terminal, so without pruning the
    /// result may accept more.
    pub fn prefix_closure(&self) -> Automaton<S> {
        let mut out = Automaton::with_capacity(self.size());
        out.embed(self, |state| (state.is_initial(), true));
        out
    }
}
