use std::collections::VecDeque;

use crate::Symbol;

/// A finite sequence of symbols of type `S`. This is what an automaton reads, e.g. in
/// [`crate::Automaton::accepts`]. Words over `char` can be given as string slices, words over
/// arbitrary symbols as slices, arrays, vectors or deques.
pub trait FiniteWord<S: Symbol> {
    /// Returns an iterator over the symbols of the word, from first to last.
    fn symbols(&self) -> impl Iterator<Item = S> + '_;

    /// Returns the number of symbols in the word.
    fn len(&self) -> usize {
        self.symbols().count()
    }

    /// Returns true if the word has no symbols.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects the symbols into a vector.
    fn to_vec(&self) -> Vec<S> {
        self.symbols().collect()
    }

    /// Collects the symbols into a vector in reverse order.
    fn reversed(&self) -> Vec<S> {
        let mut out = self.to_vec();
        out.reverse();
        out
    }
}

impl FiniteWord<char> for str {
    fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl FiniteWord<char> for String {
    fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl<S: Symbol> FiniteWord<S> for [S] {
    fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        <[S]>::len(self)
    }
}

impl<S: Symbol, const N: usize> FiniteWord<S> for [S; N] {
    fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        N
    }
}

impl<S: Symbol> FiniteWord<S> for Vec<S> {
    fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<S: Symbol> FiniteWord<S> for VecDeque<S> {
    fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.iter().cloned()
    }
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<S: Symbol, W: FiniteWord<S> + ?Sized> FiniteWord<S> for &W {
    fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        (**self).symbols()
    }
    fn len(&self) -> usize {
        (**self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::FiniteWord;

    #[test]
    fn words_of_different_shapes() {
        assert_eq!("abc".to_vec(), vec!['a', 'b', 'c']);
        assert_eq!("abc".reversed(), vec!['c', 'b', 'a']);
        assert!("".is_empty());
        assert_eq!([1u8, 2, 3].len(), 3);
        assert_eq!(vec!["x".to_string()].to_vec(), vec!["x".to_string()]);
        let w: &[u32] = &[];
        assert!(FiniteWord::is_empty(w));
    }
}
