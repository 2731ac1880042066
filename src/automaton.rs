use std::fmt::Debug;

use itertools::Itertools;
use tracing::trace;

use crate::{
    math::{OrderedMap, OrderedSet, StateSet},
    prelude::*,
};

mod state;
pub use state::{DefaultIdType, State, StateId};
use state::{fresh_owner, OwnerTag};

mod transition;
pub use transition::Transition;

mod builder;
pub use builder::Builder;

mod run;

mod reachable;

/// The transitions leaving (or, in the reverse index, arriving at) one state, grouped by
/// their label. The key `None` holds the silent transitions.
pub(crate) type Adjacency<S> = OrderedMap<Option<S>, OrderedSet<Transition<S>>>;

/// A finite automaton over symbols of type `S`, possibly nondeterministic and possibly
/// with silent transitions.
///
/// States live in an arena owned by the automaton, a [`StateId`] is a handle into that
/// arena. Transitions are stored twice: in a forward index, which maps every state and label
/// to the transitions departing from that state with that label, and in a reverse index that
/// maps every state and label to the transitions arriving at that state. Both indices are
/// only ever modified together.
///
/// The alphabet of an automaton is the set of symbols that appear on at least one of its
/// transitions, it grows as transitions are added.
///
/// # Example
/// ```
/// use automata_algebra::prelude::*;
///
/// let mut aut = Automaton::new();
/// let q0 = aut.add_state(true, false);
/// let q1 = aut.add_state(false, true);
/// aut.add_edge(q0, 'a', q1).unwrap();
/// aut.add_edge(q1, 'b', q0).unwrap();
///
/// assert!(aut.accepts("aba"));
/// assert!(!aut.accepts("ab"));
/// ```
///
/// Cloning an automaton yields an independent automaton with its own owner tag. The states
/// of the clone have the same indices as the original ones, but handles of one are foreign
/// to the other.
pub struct Automaton<S: Symbol = char> {
    owner: OwnerTag,
    pub(crate) states: Vec<State>,
    alphabet: OrderedSet<S>,
    forward: Vec<Adjacency<S>>,
    reverse: Vec<Adjacency<S>>,
}

impl<S: Symbol> Clone for Automaton<S> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.size());
        out.embed(self, |state| (state.is_initial(), state.is_terminal()));
        out
    }
}

impl<S: Symbol> Default for Automaton<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> Automaton<S> {
    /// Creates an automaton without any states. It accepts nothing.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an automaton without states but with room for `cap` states.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            owner: fresh_owner(),
            states: Vec::with_capacity(cap),
            alphabet: OrderedSet::new(),
            forward: Vec::with_capacity(cap),
            reverse: Vec::with_capacity(cap),
        }
    }

    /// The canonical automaton for the empty word: a single state which is initial and
    /// terminal, and no transitions.
    pub fn epsilon() -> Self {
        let mut aut = Self::with_capacity(1);
        aut.add_state(true, true);
        aut
    }

    /// Builds a chain of states that accepts precisely the given word.
    pub fn word<W: FiniteWord<S>>(word: W) -> Self {
        let mut aut = Self::with_capacity(word.len() + 1);
        let mut current = aut.add_state(true, false);
        for sym in word.symbols() {
            let next = aut.add_state(false, false);
            aut.link(current, Some(sym), next);
            current = next;
        }
        aut.states[current.index()].terminal = true;
        aut
    }

    /// Builds an automaton accepting only the one-letter word `sym`.
    pub fn symbol(sym: S) -> Self {
        Self::word([sym])
    }

    /// Returns a fluent [`Builder`] for constructing automata state by state.
    pub fn builder() -> Builder<S> {
        Builder::default()
    }

    /// Returns true if `q` is a handle created by `self`.
    pub fn owns(&self, q: StateId) -> bool {
        self.position(q).is_some()
    }

    fn position(&self, q: StateId) -> Option<usize> {
        (q.owner == self.owner && q.index() < self.states.len()).then_some(q.index())
    }

    /// Returns the handle of `self` that has the same index as `q`, which usually belongs to
    /// an automaton that `self` was cloned from.
    pub(crate) fn rebind(&self, q: StateId) -> StateId {
        StateId::new(self.owner, q.index())
    }

    fn checked(&self, q: StateId) -> Result<usize, AutomatonError> {
        self.position(q)
            .ok_or(AutomatonError::InvalidReference { state: q })
    }

    /// Adds a new state with the given flags and returns its handle.
    pub fn add_state(&mut self, initial: bool, terminal: bool) -> StateId {
        let id = StateId::new(self.owner, self.states.len());
        self.states.push(State::new(initial, terminal));
        self.forward.push(Adjacency::new());
        self.reverse.push(Adjacency::new());
        id
    }

    /// Adds a state that carries over the name of `original`, but gets the given flags.
    pub(crate) fn add_copy(&mut self, original: &State, initial: bool, terminal: bool) -> StateId {
        let q = self.add_state(initial, terminal);
        self.states[q.index()].name = original.name.clone();
        q
    }

    /// Changes whether `q` is initial.
    pub fn set_initial(&mut self, q: StateId, initial: bool) -> Result<(), AutomatonError> {
        let idx = self.checked(q)?;
        self.states[idx].initial = initial;
        Ok(())
    }

    /// Changes whether `q` is terminal.
    pub fn set_terminal(&mut self, q: StateId, terminal: bool) -> Result<(), AutomatonError> {
        let idx = self.checked(q)?;
        self.states[idx].terminal = terminal;
        Ok(())
    }

    /// Gives `q` a name, which can later be used to find it with [`Automaton::state_by_name`].
    pub fn set_name<N: Into<String>>(&mut self, q: StateId, name: N) -> Result<(), AutomatonError> {
        let idx = self.checked(q)?;
        self.states[idx].name = Some(name.into());
        Ok(())
    }

    /// Returns the name of `q`, if it has one.
    pub fn name(&self, q: StateId) -> Option<&str> {
        self.state(q).and_then(|s| s.name())
    }

    /// Finds the first state with the given name.
    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s.name() == Some(name))
            .map(|i| StateId::new(self.owner, i))
    }

    /// Adds the transition `(source, label, target)`, a label of `None` makes it silent.
    /// Returns whether the transition was new. Fails if one of the endpoints was not created
    /// by `self`, in which case nothing is changed.
    pub fn add_transition(
        &mut self,
        source: StateId,
        label: Option<S>,
        target: StateId,
    ) -> Result<bool, AutomatonError> {
        self.checked(source)?;
        self.checked(target)?;
        Ok(self.insert(Transition::new(source, label, target)))
    }

    /// Adds a transition labeled with `sym`, see [`Automaton::add_transition`].
    pub fn add_edge(
        &mut self,
        source: StateId,
        sym: S,
        target: StateId,
    ) -> Result<bool, AutomatonError> {
        self.add_transition(source, Some(sym), target)
    }

    /// Adds a silent transition, see [`Automaton::add_transition`].
    pub fn add_silent(&mut self, source: StateId, target: StateId) -> Result<bool, AutomatonError> {
        self.add_transition(source, None, target)
    }

    /// Used by the transformations, which only ever connect states they have just created
    /// themselves.
    pub(crate) fn link(&mut self, source: StateId, label: Option<S>, target: StateId) -> bool {
        debug_assert!(
            self.owns(source) && self.owns(target),
            "transition ({source:?}, {target:?}) connects foreign states"
        );
        self.insert(Transition::new(source, label, target))
    }

    fn insert(&mut self, transition: Transition<S>) -> bool {
        let (source, target) = (transition.source.index(), transition.target.index());
        if let Some(sym) = &transition.label {
            if !self.alphabet.contains(sym) {
                self.alphabet.insert(sym.clone());
            }
        }
        let fresh = self.forward[source]
            .entry(transition.label.clone())
            .or_default()
            .insert(transition.clone());
        if fresh {
            trace!("added transition {}", transition.show());
            self.reverse[target]
                .entry(transition.label.clone())
                .or_default()
                .insert(transition);
        }
        fresh
    }

    /// Low-level utility that rewrites every label in place by applying `f`, silent
    /// transitions stay silent. Unlike the transformations in [`crate::operations`], this
    /// modifies `self`. Transitions that become identical are merged and the alphabet is
    /// recomputed from the rewritten labels.
    pub fn rewrite_labels<F: FnMut(&S) -> S>(&mut self, mut f: F) {
        let transitions = self.transitions().cloned().collect_vec();
        self.alphabet.clear();
        self.forward.iter_mut().for_each(|adj| adj.clear());
        self.reverse.iter_mut().for_each(|adj| adj.clear());
        for t in transitions {
            let label = t.label.as_ref().map(&mut f);
            self.insert(Transition::new(t.source, label, t.target));
        }
    }

    /// Returns the alphabet, i.e. the symbols appearing on some transition.
    pub fn alphabet(&self) -> &OrderedSet<S> {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions.
    pub fn transition_count(&self) -> usize {
        self.forward
            .iter()
            .map(|adj| adj.values().map(|ts| ts.len()).sum::<usize>())
            .sum()
    }

    /// Returns true if `self` has at least one transition.
    pub fn has_transitions(&self) -> bool {
        self.forward.iter().any(|adj| !adj.is_empty())
    }

    /// Iterates over all states.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(move |i| StateId::new(self.owner, i))
    }

    /// Gives access to the data of the state `q`.
    pub fn state(&self, q: StateId) -> Option<&State> {
        self.position(q).map(|i| &self.states[i])
    }

    /// Iterates over the initial states.
    pub fn initials(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(|q| self.states[q.index()].initial)
    }

    /// Iterates over the terminal states.
    pub fn terminals(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(|q| self.states[q.index()].terminal)
    }

    /// Returns true if `q` belongs to `self` and is initial.
    pub fn is_initial(&self, q: StateId) -> bool {
        self.state(q).is_some_and(|s| s.initial)
    }

    /// Returns true if `q` belongs to `self` and is terminal.
    pub fn is_terminal(&self, q: StateId) -> bool {
        self.state(q).is_some_and(|s| s.terminal)
    }

    /// Iterates over all transitions, grouped by source state.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S>> + '_ {
        self.forward.iter().flat_map(|adj| adj.values().flatten())
    }

    /// Iterates over all transitions leaving `q`.
    pub fn delta(&self, q: StateId) -> impl Iterator<Item = &Transition<S>> + '_ {
        self.position(q)
            .map(|i| self.forward[i].values().flatten())
            .into_iter()
            .flatten()
    }

    /// Iterates over the transitions leaving `q` with the given label, `None` selects the
    /// silent transitions.
    pub fn delta_on(&self, q: StateId, label: Option<&S>) -> impl Iterator<Item = &Transition<S>> + '_ {
        self.position(q)
            .and_then(|i| self.forward[i].get(&label.cloned()))
            .into_iter()
            .flatten()
    }

    /// Iterates over all transitions arriving at `q`.
    pub fn delta_inverse(&self, q: StateId) -> impl Iterator<Item = &Transition<S>> + '_ {
        self.position(q)
            .map(|i| self.reverse[i].values().flatten())
            .into_iter()
            .flatten()
    }

    /// Iterates over the transitions arriving at `q` with the given label, `None` selects the
    /// silent transitions.
    pub fn delta_inverse_on(
        &self,
        q: StateId,
        label: Option<&S>,
    ) -> impl Iterator<Item = &Transition<S>> + '_ {
        self.position(q)
            .and_then(|i| self.reverse[i].get(&label.cloned()))
            .into_iter()
            .flatten()
    }

    /// Returns the states that can be reached from `q` with a single transition.
    pub fn successors(&self, q: StateId) -> StateSet {
        self.delta(q).map(|t| t.target).collect()
    }

    /// Returns the states from which `q` can be reached with a single transition.
    pub fn predecessors(&self, q: StateId) -> StateSet {
        self.delta_inverse(q).map(|t| t.source).collect()
    }

    /// Returns true if there is exactly one initial state, no silent transitions and at most
    /// one transition for every state and symbol.
    pub fn is_deterministic(&self) -> bool {
        self.initials().count() == 1
            && self.forward.iter().all(|adj| {
                adj.iter()
                    .all(|(label, ts)| label.is_some() && ts.len() <= 1)
            })
    }

    /// Returns true if `self` is the canonical automaton for the empty word, see
    /// [`Automaton::epsilon`].
    pub fn is_epsilon(&self) -> bool {
        self.size() == 1 && !self.has_transitions() && self.states[0].initial && self.states[0].terminal
    }

    /// Copies all states and transitions of `other` into `self`. The closure decides the
    /// initial and terminal flag of every copied state, names are kept. Returns the handles
    /// of the copies, indexed by the position of the original state.
    pub(crate) fn embed<F>(&mut self, other: &Automaton<S>, mut flags: F) -> Vec<StateId>
    where
        F: FnMut(&State) -> (bool, bool),
    {
        let map = other
            .states
            .iter()
            .map(|state| {
                let (initial, terminal) = flags(state);
                self.add_copy(state, initial, terminal)
            })
            .collect_vec();
        for t in other.transitions() {
            self.link(map[t.source.index()], t.label.clone(), map[t.target.index()]);
        }
        map
    }

    fn decorate_state(&self, q: StateId) -> String {
        let state = &self.states[q.index()];
        format!(
            "{}{}{}{}",
            if state.initial { "→" } else { "" },
            q.show(),
            state
                .name
                .as_ref()
                .map(|n| format!("({n})"))
                .unwrap_or_default(),
            if state.terminal { "*" } else { "" }
        )
    }

    /// Returns a string representation of the transition table of the automaton. Initial
    /// states are marked with `→`, terminal states with `*`.
    pub fn build_transition_table<SD>(&self, state_decorator: SD) -> String
    where
        SD: Fn(StateId, String) -> String,
    {
        let silent = self
            .forward
            .iter()
            .any(|adj| adj.contains_key(&None));
        let labels = self
            .alphabet
            .iter()
            .cloned()
            .map(Some)
            .chain(silent.then_some(None))
            .collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(labels.iter().map(|l| l.show())),
        );
        for q in self.states() {
            let mut row = vec![state_decorator(q, self.decorate_state(q))];
            for label in &labels {
                let targets = self.delta_on(q, label.as_ref()).map(|t| t.target).collect_vec();
                if targets.is_empty() {
                    row.push("-".to_string());
                } else {
                    row.push(targets.iter().map(|p| p.show()).join(", "));
                }
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<S: Symbol> Show for Automaton<S> {
    fn show(&self) -> String {
        use owo_colors::OwoColorize;
        self.build_transition_table(|q, decorated| {
            match (self.is_initial(q), self.is_terminal(q)) {
                (_, true) => decorated.green().bold().to_string(),
                (true, false) => decorated.bold().to_string(),
                _ => decorated,
            }
        })
    }
}

impl<S: Symbol> Debug for Automaton<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_transition_table(|_, decorated| decorated))
    }
}
