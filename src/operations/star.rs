use crate::prelude::*;

impl<S: Symbol> Automaton<S> {
    /// Builds the Kleene star of `self`, accepting the empty word and every concatenation of
    /// one or more words accepted by `self`.
    ///
    /// Two hub states are created, both initial and terminal: the first one stands for zero
    /// repetitions, the second one is the point where one repetition ends and the next
    /// begins. Every transition leaving an initial state of `self` also leaves both hubs and
    /// every transition entering a terminal state also enters both hubs. Apart from that the
    /// transitions are copied, and the copied states are neither initial nor terminal.
    ///
    /// An automaton without transitions accepts at most the empty word, in that case the
    /// canonical empty-word automaton is returned.
    pub fn star(&self) -> Automaton<S> {
        if !self.has_transitions() {
            return Automaton::epsilon();
        }
        let mut out = Automaton::with_capacity(self.size() + 2);
        let hubs = [out.add_state(true, true), out.add_state(true, true)];
        let map = out.add_flagless_copies(self);

        for t in self.transitions() {
            let mut sources = vec![map[t.source().index()]];
            if self.is_initial(t.source()) {
                sources.extend(hubs);
            }
            let mut targets = vec![map[t.target().index()]];
            if self.is_terminal(t.target()) {
                targets.extend(hubs);
            }
            for &p in &sources {
                for &q in &targets {
                    out.link(p, t.label().cloned(), q);
                }
            }
        }
        out
    }
}
