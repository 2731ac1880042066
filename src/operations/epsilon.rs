use tracing::debug;

use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Produces an automaton without silent transitions that accepts the same words. The
    /// states are copied one to one, a copy is terminal if the epsilon-closure of the
    /// original reaches a terminal state, and it receives every labeled transition that leaves
    /// some state of that closure.
    pub fn remove_epsilon(&self) -> Automaton<S> {
        let mut out = Automaton::with_capacity(self.size());
        let map = self
            .states()
            .map(|q| {
                let closure = self.closure(&StateSet::singleton(q));
                out.add_copy(
                    &self.states[q.index()],
                    self.is_initial(q),
                    closure.any(|r| self.is_terminal(r)),
                )
            })
            .collect::<Vec<_>>();

        for q in self.states() {
            for r in &self.closure(&StateSet::singleton(q)) {
                for t in self.delta(r).filter(|t| !t.is_silent()) {
                    out.link(map[q.index()], t.label().cloned(), map[t.target().index()]);
                }
            }
        }
        debug!(
            "removed silent transitions, {} transitions remain",
            out.transition_count()
        );
        out
    }
}
