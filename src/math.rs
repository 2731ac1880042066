use std::{collections::BTreeSet, hash::Hash};

use itertools::Itertools;

use crate::{automaton::StateId, Show};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
/// Type alias for sets whose iteration order is the order of the elements.
pub type OrderedSet<S> = std::collections::BTreeSet<S>;
/// Type alias for maps whose iteration order is the order of the keys.
pub type OrderedMap<K, V> = std::collections::BTreeMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord + Copy> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements of
    /// type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the position of the class that contains `element`, if there is one.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(element))
    }

    /// Returns a map that associates every element with the position of its class.
    pub fn class_map(&self) -> Map<I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, class)| class.iter().map(move |q| (*q, i)))
            .collect()
    }

    /// Returns the smallest element of the class at position `class`.
    pub fn representative(&self, class: usize) -> Option<I> {
        self.0.get(class).and_then(|c| c.first().copied())
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

/// A finite set of states, stored in canonical (sorted) form. Two [`StateSet`]s are equal
/// and hash equally if and only if they contain the same states, which is what the subset
/// and product constructions rely on when memoizing the sets they have already explored.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(OrderedSet<StateId>);

impl StateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing only `q`.
    pub fn singleton(q: StateId) -> Self {
        Self(OrderedSet::from_iter([q]))
    }

    /// Inserts `q`, returns `true` if it was not yet present.
    pub fn insert(&mut self, q: StateId) -> bool {
        self.0.insert(q)
    }

    /// Returns true if `q` is an element of `self`.
    pub fn contains(&self, q: &StateId) -> bool {
        self.0.contains(q)
    }

    /// Returns the number of states in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set contains no states.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the states in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().copied()
    }

    /// Returns true if `self` and `other` share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Returns true if some state of `self` satisfies `pred`.
    pub fn any<F: FnMut(StateId) -> bool>(&self, pred: F) -> bool {
        self.iter().any(pred)
    }
}

impl Extend<StateId> for StateSet {
    fn extend<T: IntoIterator<Item = StateId>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        Self(OrderedSet::from_iter(iter))
    }
}

impl IntoIterator for StateSet {
    type Item = StateId;
    type IntoIter = std::collections::btree_set::IntoIter<StateId>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, StateId>>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl Show for StateSet {
    fn show(&self) -> String {
        if self.0.is_empty() {
            "∅".to_string()
        } else {
            format!("{{{}}}", self.iter().map(|q| q.show()).join(", "))
        }
    }
}
