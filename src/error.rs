use thiserror::Error;

use crate::automaton::StateId;

/// Errors that can occur when constructing automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A state handle was used with an automaton that did not create it.
    #[error("state {state:?} does not belong to this automaton")]
    InvalidReference {
        /// The offending handle.
        state: StateId,
    },
    /// A budgeted construction would have created more states than allowed.
    #[error("construction exceeded its budget of {limit} states")]
    BudgetExhausted {
        /// The number of states that was allowed.
        limit: usize,
    },
}
