use std::{
    fmt::Debug,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::Show;

/// The integer type backing state indices.
pub type DefaultIdType = u32;

/// The integer type of the tag that marks which automaton a [`StateId`] belongs to. It is
/// wide enough that a process never runs out of distinct tags.
pub(crate) type OwnerTag = u64;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// Hands out a tag that no other automaton created in this process carries.
pub(crate) fn fresh_owner() -> OwnerTag {
    NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
}

/// An opaque handle to a state of one particular [`crate::Automaton`]. Handles are only
/// meaningful for the automaton that created them: besides the position of the state, they
/// carry a tag of their owner, so that an automaton can recognize (and reject) handles that
/// were created by some other automaton.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId {
    pub(crate) owner: OwnerTag,
    pub(crate) index: DefaultIdType,
}

impl StateId {
    /// Panics if `index` does not fit into [`DefaultIdType`].
    pub(crate) fn new(owner: OwnerTag, index: usize) -> Self {
        let index = DefaultIdType::try_from(index)
            .expect("an automaton cannot hold more states than DefaultIdType can address");
        Self { owner, index }
    }

    /// The position of the state within its automaton. States are numbered consecutively in
    /// the order in which they were added, starting at zero.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.index)
    }
}

impl Show for StateId {
    fn show(&self) -> String {
        format!("q{}", self.index)
    }
}

/// The data stored for every state: whether it is initial, whether it is terminal and an
/// optional name. The name is only used for display and lookup, it plays no role in the
/// identity of the state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    pub(crate) initial: bool,
    pub(crate) terminal: bool,
    pub(crate) name: Option<String>,
}

impl State {
    pub(crate) fn new(initial: bool, terminal: bool) -> Self {
        Self {
            initial,
            terminal,
            name: None,
        }
    }

    /// Returns true if the state is initial.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Returns true if the state is terminal (accepting).
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns the name of the state, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
