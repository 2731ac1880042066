//! Library for building finite automata and combining them with the operations of the
//! algebra of regular languages.
//!
//! The central type is [`Automaton`]. It owns a collection of states, each of which may be
//! initial and/or terminal, together with the transitions between them. A transition is a
//! triple `(source, label, target)` where the label is either a symbol or `None`, the latter
//! denoting a silent (epsilon) transition. The automaton keeps two mirrored indices, one for
//! the forward direction (departures of a state) and one for the reverse direction (arrivals
//! at a state), and these are always updated together.
//!
//! Automata are generic over their labels, anything implementing [`Symbol`] can be used. The
//! default is `char`, which makes it convenient to run words given as string slices.
//!
//! On top of the data structure, the crate implements
//! - epsilon-closure and stepping (see [`Automaton::closure`], [`Automaton::step`],
//!   [`Automaton::accepts`] and [`Automaton::trace`]),
//! - the subset construction ([`Automaton::determinize`]) and, behind the `minimize` feature,
//!   partition refinement ([`Automaton::minimize`]),
//! - the regular operations union, concatenation, Kleene star, complement, reversal,
//!   prefix-closure, pruning, normalization and epsilon elimination,
//! - a synchronized product of two automata ([`Automaton::mix`]), parameterized by a
//!   [`Synchronization`] strategy.
//!
//! Every transformation leaves its input untouched and returns a fresh automaton. State
//! handles ([`StateId`]) are scoped to the automaton that created them, using a handle of
//! one automaton with another is reported as [`AutomatonError::InvalidReference`].
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_algebra::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{IoLabel, Symbol},
        automaton::{Automaton, Builder, State, StateId, Transition},
        error::AutomatonError,
        math,
        math::StateSet,
        operations::{Completion, SubsetConstruction},
        synchronization::{Equality, InputOutput, Synchronization},
        word::FiniteWord,
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with labels/symbols.
pub mod alphabet;
pub use alphabet::Symbol;

/// Module that contains definitions for dealing with finite words.
pub mod word;

mod error;
pub use error::AutomatonError;

/// Defines the [`Automaton`] data structure, its construction API and the stepping engine.
pub mod automaton;
pub use automaton::{Automaton, StateId, Transition};

/// Implementations of the language-algebra operations on automata.
pub mod operations;

/// Synchronization strategies that can be used for building the product of two automata.
pub mod synchronization;
pub use synchronization::Synchronization;

/// Contains the partition refinement minimization. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example q0, q1, q2, ... and for a transition (q0, a, q1) it should be (q0, a, q1).
    /// Just use something that makes sense. This is mainly used for debugging purposes.
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}
    /// and for a word of symbols it should be "abc".
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
    {
        format!(
            "\"{}\"",
            iter.into_iter().map(|sym| sym.to_string()).join("")
        )
    }
}

macro_rules! impl_show_via_to_string {
    ($($t:ty),*) => {
        $(
            impl Show for $t {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    }
}

impl_show_via_to_string!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, String, str);

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for Option<S> {
    fn show(&self) -> String {
        match self {
            None => "ε".to_string(),
            Some(x) => x.show(),
        }
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
