use tracing::debug;

use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Returns a copy of `self` that only retains the states which are both accessible (can be
    /// reached from an initial state) and co-accessible (can reach a terminal state), together
    /// with the transitions between them. The accepted language does not change.
    pub fn prune(&self) -> Automaton<S> {
        let accessible = self.accessible_states(&self.initial_set());
        let useful = self.co_accessible_states(&self.terminal_set());

        let mut out = Automaton::with_capacity(accessible.len().min(useful.len()));
        let map = self
            .states()
            .map(|q| {
                (accessible.contains(&q) && useful.contains(&q)).then(|| {
                    out.add_copy(&self.states[q.index()], self.is_initial(q), self.is_terminal(q))
                })
            })
            .collect::<Vec<_>>();

        for t in self.transitions() {
            if let (Some(source), Some(target)) = (map[t.source().index()], map[t.target().index()]) {
                out.link(source, t.label().cloned(), target);
            }
        }
        debug!("pruning kept {} of {} states", out.size(), self.size());
        out
    }
}
