use crate::prelude::*;

/// An automaton with exactly one initial state that has no incoming transitions and
/// exactly one terminal state that has no outgoing transitions.
#[derive(Debug)]
pub struct Normalized<S: Symbol> {
    automaton: Automaton<S>,
    initial: StateId,
    terminal: StateId,
}

impl<S: Symbol> Clone for Normalized<S> {
    fn clone(&self) -> Self {
        let automaton = self.automaton.clone();
        Self {
            initial: automaton.rebind(self.initial),
            terminal: automaton.rebind(self.terminal),
            automaton,
        }
    }
}

impl<S: Symbol> Normalized<S> {
    /// The underlying automaton.
    pub fn automaton(&self) -> &Automaton<S> {
        &self.automaton
    }

    /// Consumes `self` and returns the underlying automaton.
    pub fn into_automaton(self) -> Automaton<S> {
        self.automaton
    }

    /// The unique initial state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// The unique terminal state.
    pub fn terminal(&self) -> StateId {
        self.terminal
    }
}

impl<S: Symbol> Automaton<S> {
    /// Brings `self` into normal form, see [`Normalized`]. Returns `None` if `self` accepts
    /// no word at all, since then pruning leaves neither an initial nor a terminal state.
    ///
    /// Every state is copied without its flags, and a fresh initial state `init` as well as a
    /// fresh terminal state `term` are added. Every transition is copied, and additionally
    /// duplicated to leave `init` if it leaves an initial state, to enter `term` if it enters a
    /// terminal state, or both. If the empty word is accepted, a silent transition connects
    /// `init` to `term`. Finally the result is pruned.
    pub fn normalize(&self) -> Option<Normalized<S>> {
        let mut out = Automaton::with_capacity(self.size() + 2);
        let init = out.add_state(true, false);
        let term = out.add_state(false, true);
        let map = out.add_flagless_copies(self);

        for t in self.transitions() {
            let mut sources = vec![map[t.source().index()]];
            if self.is_initial(t.source()) {
                sources.push(init);
            }
            let mut targets = vec![map[t.target().index()]];
            if self.is_terminal(t.target()) {
                targets.push(term);
            }
            for &p in &sources {
                for &q in &targets {
                    out.link(p, t.label().cloned(), q);
                }
            }
        }
        if self.accepts_empty_word() {
            out.link(init, None, term);
        }

        let automaton = out.prune();
        let initial = automaton.initials().next()?;
        let terminal = automaton.terminals().next()?;
        debug_assert_eq!(automaton.initials().count(), 1);
        debug_assert_eq!(automaton.terminals().count(), 1);
        Some(Normalized {
            automaton,
            initial,
            terminal,
        })
    }

    /// Adds copies of the states of `other` which are neither initial nor terminal, and returns
    /// them indexed by position. Transitions are left to the caller.
    pub(crate) fn add_flagless_copies(&mut self, other: &Automaton<S>) -> Vec<StateId> {
        other
            .states
            .iter()
            .map(|state| self.add_copy(state, false, false))
            .collect()
    }
}
