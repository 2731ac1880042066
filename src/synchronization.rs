use crate::{alphabet::IoLabel, math::OrderedSet, prelude::*};

/// Decides which pairs of labels fire jointly in the product of two automata, see
/// [`Automaton::mix`]. The left label always comes from the left operand of the product.
///
/// Labels that synchronize with at least one label of the other operand's alphabet can only
/// be taken jointly, all remaining labels move one side of the product independently.
pub trait Synchronization<S: Symbol> {
    /// Returns the label of the joint move if `left` and `right` synchronize, `None` otherwise.
    fn synchronize(&self, left: &S, right: &S) -> Option<S>;

    /// Returns the labels of `left` that synchronize with some label of `right`.
    fn left_synchronizing(&self, left: &OrderedSet<S>, right: &OrderedSet<S>) -> OrderedSet<S> {
        left.iter()
            .filter(|l| right.iter().any(|r| self.synchronize(l, r).is_some()))
            .cloned()
            .collect()
    }

    /// Returns the labels of `right` that synchronize with some label of `left`.
    fn right_synchronizing(&self, left: &OrderedSet<S>, right: &OrderedSet<S>) -> OrderedSet<S> {
        right
            .iter()
            .filter(|r| left.iter().any(|l| self.synchronize(l, r).is_some()))
            .cloned()
            .collect()
    }
}

impl<S: Symbol, F: Fn(&S, &S) -> Option<S>> Synchronization<S> for F {
    fn synchronize(&self, left: &S, right: &S) -> Option<S> {
        (self)(left, right)
    }
}

/// Two labels synchronize if and only if they are equal, the joint move carries that same
/// label. With this strategy the product accepts the words over the shared labels that both
/// operands accept, interleaved with the private labels of either side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Equality;

impl<S: Symbol> Synchronization<S> for Equality {
    fn synchronize(&self, left: &S, right: &S) -> Option<S> {
        (left == right).then(|| left.clone())
    }

    fn left_synchronizing(&self, left: &OrderedSet<S>, right: &OrderedSet<S>) -> OrderedSet<S> {
        left.intersection(right).cloned().collect()
    }

    fn right_synchronizing(&self, left: &OrderedSet<S>, right: &OrderedSet<S>) -> OrderedSet<S> {
        left.intersection(right).cloned().collect()
    }
}

/// Matches an input of one side with the output of the same payload on the other side (in
/// either direction), the joint move is the internal action with that payload. Two inputs,
/// two outputs or anything involving an internal action never synchronize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutput;

impl<T> Synchronization<IoLabel<T>> for InputOutput
where
    IoLabel<T>: Symbol,
    T: Clone + Eq,
{
    fn synchronize(&self, left: &IoLabel<T>, right: &IoLabel<T>) -> Option<IoLabel<T>> {
        match (left, right) {
            (IoLabel::Input(x), IoLabel::Output(y)) | (IoLabel::Output(x), IoLabel::Input(y))
                if x == y =>
            {
                Some(IoLabel::Internal(x.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::OrderedSet, prelude::*};

    #[test]
    fn equality() {
        assert_eq!(Equality.synchronize(&'a', &'a'), Some('a'));
        assert_eq!(Equality.synchronize(&'a', &'b'), None);

        let left = OrderedSet::from_iter(['a', 'b', 'c']);
        let right = OrderedSet::from_iter(['b', 'c', 'd']);
        let shared = OrderedSet::from_iter(['b', 'c']);
        assert_eq!(Equality.left_synchronizing(&left, &right), shared);
        assert_eq!(Equality.right_synchronizing(&left, &right), shared);
    }

    #[test]
    fn input_output() {
        use IoLabel::*;
        assert_eq!(InputOutput.synchronize(&Input('x'), &Output('x')), Some(Internal('x')));
        assert_eq!(InputOutput.synchronize(&Output('x'), &Input('x')), Some(Internal('x')));
        assert_eq!(InputOutput.synchronize(&Input('x'), &Input('x')), None);
        assert_eq!(InputOutput.synchronize(&Output('x'), &Output('x')), None);
        assert_eq!(InputOutput.synchronize(&Input('x'), &Output('y')), None);
        assert_eq!(InputOutput.synchronize(&Internal('x'), &Internal('x')), None);

        let left = OrderedSet::from_iter([Input('x'), Output('y'), Output('z')]);
        let right = OrderedSet::from_iter([Output('x'), Input('y'), Input('w')]);
        assert_eq!(
            InputOutput.left_synchronizing(&left, &right),
            OrderedSet::from_iter([Input('x'), Output('y')])
        );
        assert_eq!(
            InputOutput.right_synchronizing(&left, &right),
            OrderedSet::from_iter([Output('x'), Input('y')])
        );
    }

    #[test]
    fn closures_are_strategies() {
        let case_insensitive =
            |l: &char, r: &char| l.eq_ignore_ascii_case(r).then(|| l.to_ascii_lowercase());
        assert_eq!(case_insensitive.synchronize(&'A', &'a'), Some('a'));
        assert_eq!(case_insensitive.synchronize(&'A', &'b'), None);
    }
}
