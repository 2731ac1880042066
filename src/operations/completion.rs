use tracing::debug;

use crate::{math::OrderedSet, prelude::*};

/// Decides where the transitions go that [`Automaton::complete`] adds for symbols a state
/// has no transition on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Completion {
    /// All missing transitions lead into one fresh non-terminal trap state, which loops on
    /// every symbol. The accepted language does not change.
    #[default]
    Sink,
    /// Every missing transition becomes a self-loop. A symbol that used to be undefined is
    /// ignored afterwards, so the accepted language usually grows.
    SelfLoop,
}

impl<S: Symbol> Automaton<S> {
    /// Returns a copy of `self` in which every state has at least one outgoing transition on
    /// every symbol of the alphabet, following the given policy.
    pub fn complete(&self, policy: Completion) -> Automaton<S> {
        self.complete_over(policy, std::iter::empty())
    }

    /// Works like [`Automaton::complete`], but the given symbols are added to the alphabet
    /// before completing. The trap state of [`Completion::Sink`] is only created if some
    /// transition is actually missing.
    pub fn complete_over<I>(&self, policy: Completion, symbols: I) -> Automaton<S>
    where
        I: IntoIterator<Item = S>,
    {
        let alphabet: OrderedSet<S> = self.alphabet().iter().cloned().chain(symbols).collect();
        let mut out = Automaton::with_capacity(self.size() + 1);
        let map = out.embed(self, |state| (state.is_initial(), state.is_terminal()));

        let mut sink = None;
        for q in self.states() {
            let source = map[q.index()];
            for sym in &alphabet {
                if self.delta_on(q, Some(sym)).next().is_some() {
                    continue;
                }
                let target = match policy {
                    Completion::Sink => *sink.get_or_insert_with(|| out.add_state(false, false)),
                    Completion::SelfLoop => source,
                };
                out.link(source, Some(sym.clone()), target);
            }
        }
        if let Some(trap) = sink {
            for sym in &alphabet {
                out.link(trap, Some(sym.clone()), trap);
            }
        }
        debug!(
            "completion ({policy:?}) added {} transitions",
            out.transition_count() - self.transition_count()
        );
        out
    }

    /// Builds an automaton that accepts precisely the words over the alphabet of `self` which
    /// `self` rejects, see [`Automaton::complement_over`].
    pub fn complement(&self) -> Automaton<S> {
        self.complement_over(std::iter::empty())
    }

    /// Builds an automaton that accepts precisely the words over the alphabet of `self`
    /// extended by `symbols`, which `self` rejects.
    ///
    /// The input is determinized and then completed with [`Completion::Sink`] before every
    /// terminal flag is flipped. This works for arbitrary inputs, including nondeterministic
    /// ones and ones with silent transitions. Words that `self` cannot read to the end are
    /// rejected by `self` and therefore accepted by the complement.
    ///
    /// # Example
    /// ```
    /// use automata_algebra::prelude::*;
    ///
    /// let not_a = Automaton::symbol('a').complement_over(['b']);
    /// assert!(not_a.accepts(""));
    /// assert!(not_a.accepts("ab"));
    /// assert!(!not_a.accepts("a"));
    /// ```
    pub fn complement_over<I>(&self, symbols: I) -> Automaton<S>
    where
        I: IntoIterator<Item = S>,
    {
        let alphabet = self.alphabet().iter().cloned().chain(symbols).collect::<Vec<_>>();
        let mut out = self.determinize().complete_over(Completion::Sink, alphabet);
        for state in out.states.iter_mut() {
            state.terminal = !state.terminal;
        }
        out
    }
}
