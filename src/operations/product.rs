use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::{math::Map, prelude::*};

/// A state of the product, the epsilon-closed sets of states that the left and the right
/// operand are in.
type ProductState = (StateSet, StateSet);

impl<S: Symbol> Automaton<S> {
    /// Builds the synchronized product of `self` and `other`, where `sync` decides which
    /// labels have to be taken jointly.
    ///
    /// Every state of the result stands for a pair of epsilon-closed sets of states, one of
    /// `self` and one of `other`, and it is terminal if both sets contain a terminal state.
    /// A label of `self` that synchronizes with no label in the alphabet of `other` moves the
    /// left set on its own, and vice versa. Labels that do synchronize can only move both sets
    /// at once, the joint move is labeled with the result of [`Synchronization::synchronize`].
    ///
    /// The result has no silent transitions and a single initial state. It is deterministic
    /// unless two different moves of one pair end up with the same label, which [`Equality`]
    /// never produces. Its size may be exponential in the sizes of both operands, see
    /// [`Automaton::mix_with_budget`] for a bounded variant.
    ///
    /// # Example
    /// ```
    /// use automata_algebra::prelude::*;
    ///
    /// let left = Automaton::word("as");
    /// let right = Automaton::word("bs");
    /// let product = left.mix(&right, &Equality);
    /// assert!(product.accepts("abs"));
    /// assert!(product.accepts("bas"));
    /// assert!(!product.accepts("asbs"));
    /// ```
    pub fn mix<Y: Synchronization<S>>(&self, other: &Automaton<S>, sync: &Y) -> Automaton<S> {
        match self.explore_product(other, sync, None) {
            Ok(product) => product,
            Err(_) => unreachable!("an unbounded product construction cannot run out of budget"),
        }
    }

    /// Works like [`Automaton::mix`], but gives up with [`AutomatonError::BudgetExhausted`]
    /// as soon as more than `limit` states would be created.
    pub fn mix_with_budget<Y: Synchronization<S>>(
        &self,
        other: &Automaton<S>,
        sync: &Y,
        limit: usize,
    ) -> Result<Automaton<S>, AutomatonError> {
        self.explore_product(other, sync, Some(limit))
    }

    fn explore_product<Y: Synchronization<S>>(
        &self,
        other: &Automaton<S>,
        sync: &Y,
        limit: Option<usize>,
    ) -> Result<Automaton<S>, AutomatonError> {
        if let Some(l) = limit.filter(|l| *l == 0) {
            return Err(AutomatonError::BudgetExhausted { limit: l });
        }
        let exhausted = |size: usize| limit.is_some_and(|l| size >= l);
        let accepting = |(left, right): &ProductState| {
            left.any(|q| self.is_terminal(q)) && right.any(|q| other.is_terminal(q))
        };
        let left_sync = sync.left_synchronizing(self.alphabet(), other.alphabet());
        let right_sync = sync.right_synchronizing(self.alphabet(), other.alphabet());
        trace!(
            "synchronizing {} with {}",
            left_sync.iter().map(|s| s.show()).collect::<Vec<_>>().join(", "),
            right_sync.iter().map(|s| s.show()).collect::<Vec<_>>().join(", ")
        );

        let mut product = Automaton::new();
        let mut pairs: Map<ProductState, StateId> = Map::default();

        let start = (
            self.closure(&self.initial_set()),
            other.closure(&other.initial_set()),
        );
        let initial = product.add_state(true, accepting(&start));
        pairs.insert(start.clone(), initial);
        let mut queue = VecDeque::from([(start, initial)]);

        while let Some((current, source)) = queue.pop_front() {
            trace!("exploring pair {} as {}", current.show(), source.show());
            let (left, right) = &current;
            let left_moves = self.arrivals(left);
            let right_moves = other.arrivals(right);

            let mut moves: Vec<(S, ProductState)> = Vec::new();
            for (sym, reached) in &left_moves {
                if !left_sync.contains(sym) {
                    moves.push((sym.clone(), (reached.clone(), right.clone())));
                }
            }
            for (sym, reached) in &right_moves {
                if !right_sync.contains(sym) {
                    moves.push((sym.clone(), (left.clone(), reached.clone())));
                }
            }
            for (la, left_reached) in &left_moves {
                for (lb, right_reached) in &right_moves {
                    if let Some(sym) = sync.synchronize(la, lb) {
                        moves.push((sym, (left_reached.clone(), right_reached.clone())));
                    }
                }
            }

            for (sym, reached) in moves {
                let target = match pairs.get(&reached) {
                    Some(p) => *p,
                    None => {
                        if exhausted(product.size()) {
                            let limit = product.size();
                            warn!("product construction stopped after {limit} states");
                            return Err(AutomatonError::BudgetExhausted { limit });
                        }
                        let p = product.add_state(false, accepting(&reached));
                        pairs.insert(reached.clone(), p);
                        queue.push_back((reached, p));
                        p
                    }
                };
                product.link(source, Some(sym), target);
            }
        }

        debug!(
            "product of {} and {} states has {} states",
            self.size(),
            other.size(),
            product.size()
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{nondeterministic, words_up_to};

    /// Accepts the words over `{a, b}` with an even number of `b`.
    fn even_bs() -> Automaton {
        Builder::default()
            .from("even")
            .on('a')
            .loops()
            .on('b')
            .go("odd")
            .on('a')
            .loops()
            .on('b')
            .go("even")
            .initial("even")
            .terminal("even")
            .build()
    }

    #[test_log::test]
    fn equality_on_shared_alphabet_intersects() {
        let left = nondeterministic();
        let right = even_bs();
        let product = left.mix(&right, &Equality);
        assert!(product.is_deterministic());
        for w in words_up_to(&['a', 'b'], 6) {
            assert_eq!(
                product.accepts(&w),
                left.accepts(&w) && right.accepts(&w),
                "disagree on {}",
                w.show()
            );
        }
    }

    #[test]
    fn disjoint_alphabets_interleave() {
        let product = Automaton::word("ab").mix(&Automaton::word("xy"), &Equality);
        for accepted in ["abxy", "axby", "xaby", "xyab", "axyb"] {
            assert!(product.accepts(accepted), "{accepted}");
        }
        for rejected in ["ab", "xy", "baxy", "abyx", "abxyab"] {
            assert!(!product.accepts(rejected), "{rejected}");
        }
    }

    #[test]
    fn shared_labels_fire_jointly() {
        let product = Automaton::word("as").mix(&Automaton::word("bs"), &Equality);
        assert!(product.accepts("abs"));
        assert!(product.accepts("bas"));
        assert!(!product.accepts("as"));
        assert!(!product.accepts("asbs"));
        assert!(!product.accepts("abss"));
    }

    #[test_log::test]
    fn inputs_meet_outputs() {
        use IoLabel::*;
        let client = Automaton::word(vec![Output('m'), Input('r')]);
        let server = Automaton::word(vec![Input('m'), Output('r')]);
        let product = client.mix(&server, &InputOutput);
        assert!(product.accepts(vec![Internal('m'), Internal('r')]));
        assert!(!product.accepts(vec![Output('m')]));
        assert!(!product.accepts(vec![Internal('m')]));
        assert_eq!(
            product.alphabet().iter().cloned().collect::<Vec<_>>(),
            vec![Internal('m'), Internal('r')]
        );
    }

    #[test]
    fn budget_is_enforced() {
        let left = nondeterministic();
        let right = even_bs();
        let size = left.mix(&right, &Equality).size();
        assert!(left.mix_with_budget(&right, &Equality, size).is_ok());
        assert_eq!(
            left.mix_with_budget(&right, &Equality, size - 1).unwrap_err(),
            AutomatonError::BudgetExhausted { limit: size - 1 }
        );
        assert!(left.mix_with_budget(&right, &Equality, 0).is_err());
    }
}
