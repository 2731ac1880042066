use crate::{math::Map, prelude::*};

/// Helper struct for constructing an [`Automaton`] step by step, referring to states by
/// name. States are created on first mention. The builder remembers a current state and a
/// pending label, so that a path can be written down as a chain of calls.
///
/// # Example
///
/// We want an automaton that reads `ab` from `s0` to `s2`, and that can loop on `c` in `s2`.
/// ```
/// use automata_algebra::prelude::*;
///
/// let aut = Builder::default()
///     .from("s0")
///     .on('a')
///     .go("s1")
///     .on('b')
///     .go("s2")
///     .on('c')
///     .loops()
///     .initial("s0")
///     .terminal("s2")
///     .build();
///
/// assert!(aut.accepts("abccc"));
/// assert!(!aut.accepts("abca"));
/// ```
pub struct Builder<S: Symbol = char> {
    automaton: Automaton<S>,
    names: Map<String, StateId>,
    current: Option<StateId>,
    pending: Option<S>,
}

impl<S: Symbol> Default for Builder<S> {
    fn default() -> Self {
        Self {
            automaton: Automaton::new(),
            names: Map::default(),
            current: None,
            pending: None,
        }
    }
}

impl<S: Symbol> Builder<S> {
    fn lookup(&mut self, name: &str) -> StateId {
        if let Some(q) = self.names.get(name) {
            return *q;
        }
        let q = self.automaton.add_state(false, false);
        self.automaton.states[q.index()].name = Some(name.to_string());
        self.names.insert(name.to_string(), q);
        q
    }

    /// Makes the state with the given name the current one, discarding any pending label.
    pub fn from(mut self, name: &str) -> Self {
        self.current = Some(self.lookup(name));
        self.pending = None;
        self
    }

    /// Sets the label that the next call to [`Builder::go`] or [`Builder::loops`] uses.
    pub fn on(mut self, sym: S) -> Self {
        self.pending = Some(sym);
        self
    }

    /// Adds a transition from the current state to the state with the given name, labeled
    /// with the pending label, or silent if no label is pending. The target becomes the
    /// current state. Without a current state, this only selects the target.
    pub fn go(mut self, name: &str) -> Self {
        let target = self.lookup(name);
        if let Some(source) = self.current {
            self.automaton.link(source, self.pending.take(), target);
        }
        self.current = Some(target);
        self
    }

    /// Adds a transition from the current state to itself, labeled with the pending label.
    pub fn loops(mut self) -> Self {
        if let Some(q) = self.current {
            self.automaton.link(q, self.pending.take(), q);
        }
        self
    }

    /// Marks the state with the given name as initial.
    pub fn initial(mut self, name: &str) -> Self {
        let q = self.lookup(name);
        self.automaton.states[q.index()].initial = true;
        self
    }

    /// Marks the state with the given name as terminal.
    pub fn terminal(mut self, name: &str) -> Self {
        let q = self.lookup(name);
        self.automaton.states[q.index()].terminal = true;
        self
    }

    /// Returns the handle of the state with the given name, if it has been mentioned.
    pub fn state(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Consumes the builder and returns the automaton.
    pub fn build(self) -> Automaton<S> {
        self.automaton
    }
}
