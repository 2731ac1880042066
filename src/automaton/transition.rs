use std::fmt::Debug;

use crate::{automaton::StateId, Show, Symbol};

/// A transition `(source, label, target)`. The label is `None` for a silent transition.
/// Transitions are compared and hashed by all three components.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition<S> {
    pub(crate) source: StateId,
    pub(crate) label: Option<S>,
    pub(crate) target: StateId,
}

impl<S> Transition<S> {
    pub(crate) fn new(source: StateId, label: Option<S>, target: StateId) -> Self {
        Self {
            source,
            label,
            target,
        }
    }

    /// Returns the state the transition departs from.
    pub fn source(&self) -> StateId {
        self.source
    }

    /// Returns the state the transition arrives at.
    pub fn target(&self) -> StateId {
        self.target
    }

    /// Returns the label, or `None` if the transition is silent.
    pub fn label(&self) -> Option<&S> {
        self.label.as_ref()
    }

    /// Returns true if the transition is silent.
    pub fn is_silent(&self) -> bool {
        self.label.is_none()
    }
}

impl<S: Symbol> Show for Transition<S> {
    fn show(&self) -> String {
        format!(
            "({}, {}, {})",
            self.source.show(),
            self.label.show(),
            self.target.show()
        )
    }
}

impl<S: Symbol> Debug for Transition<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}
