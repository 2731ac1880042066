use std::{fmt::Debug, hash::Hash};

use crate::Show;

/// A symbol that can label a transition, which is also the type of the symbols in a word.
/// This is implemented for everything that can be cloned, compared, ordered, hashed and
/// shown, so `char`, integers, `String` and [`IoLabel`] all work out of the box.
///
/// The silent (epsilon) label is not a symbol, it is represented by `None` wherever a
/// transition label has type `Option<S>`.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug + Show {}
impl<S: Clone + Eq + Ord + Hash + Debug + Show> Symbol for S {}

/// A label of an input/output automaton. Inputs and outputs carrying the same payload
/// can synchronize into an internal action, see [`crate::synchronization::InputOutput`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IoLabel<T> {
    /// An action that is received from the environment, shown as `?t`.
    Input(T),
    /// An action that is emitted to the environment, shown as `!t`.
    Output(T),
    /// An action that is invisible to the environment, shown as `τt`.
    Internal(T),
}

impl<T> IoLabel<T> {
    /// Gives a reference to the payload, regardless of the polarity.
    pub fn payload(&self) -> &T {
        match self {
            IoLabel::Input(t) | IoLabel::Output(t) | IoLabel::Internal(t) => t,
        }
    }

    /// Returns true if `self` is an input.
    pub fn is_input(&self) -> bool {
        matches!(self, IoLabel::Input(_))
    }

    /// Returns true if `self` is an output.
    pub fn is_output(&self) -> bool {
        matches!(self, IoLabel::Output(_))
    }

    /// Returns true if `self` is internal.
    pub fn is_internal(&self) -> bool {
        matches!(self, IoLabel::Internal(_))
    }
}

impl<T: Show> Show for IoLabel<T> {
    fn show(&self) -> String {
        match self {
            IoLabel::Input(t) => format!("?{}", t.show()),
            IoLabel::Output(t) => format!("!{}", t.show()),
            IoLabel::Internal(t) => format!("τ{}", t.show()),
        }
    }
}

impl<T: Show> Debug for IoLabel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

#[cfg(test)]
mod tests {
    use super::IoLabel;
    use crate::Show;

    #[test]
    fn io_labels() {
        let input = IoLabel::Input('x');
        assert!(input.is_input() && !input.is_output() && !input.is_internal());
        assert_eq!(input.payload(), &'x');
        assert_eq!(input.show(), "?x");
        assert_eq!(format!("{:?}", IoLabel::Output("ack".to_string())), "!ack");
        assert_eq!(IoLabel::Internal(3u8).show(), "τ3");
    }
}
