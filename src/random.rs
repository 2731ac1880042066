use tracing::debug;

use crate::prelude::*;

/// Returns the first `symbols` lowercase letters, at most 26.
pub fn letters(symbols: usize) -> Vec<char> {
    ('a'..='z').take(symbols).collect()
}

/// Generates a random, in general nondeterministic automaton with `states` states over the
/// first `symbols` lowercase letters (see [`letters`]).
///
/// The first state is the only initial state and every state is terminal with probability
/// one half. For every pair of states `p` and `q` and every symbol, the transition
/// `p --sym--> q` is inserted with probability `density`. For every pair of distinct states a
/// silent transition is inserted with probability `epsilon_density`.
pub fn random_nfa(symbols: usize, states: usize, density: f64, epsilon_density: f64) -> Automaton {
    let alphabet = letters(symbols);
    let mut nfa = Automaton::with_capacity(states);
    let ids = (0..states)
        .map(|i| nfa.add_state(i == 0, fastrand::bool()))
        .collect::<Vec<_>>();

    for &p in &ids {
        for &q in &ids {
            for &sym in &alphabet {
                if fastrand::f64() < density {
                    nfa.link(p, Some(sym), q);
                }
            }
            if p != q && fastrand::f64() < epsilon_density {
                nfa.link(p, None, q);
            }
        }
    }
    debug!(
        "generated random automaton with {} states and {} transitions",
        nfa.size(),
        nfa.transition_count()
    );
    nfa
}

/// Generate a random `String` over the first `symbols` lowercase letters. The length is drawn
/// uniformly from the range `min_len..=max_len`.
pub fn random_word(symbols: usize, min_len: usize, max_len: usize) -> String {
    let charset = letters(symbols);
    if charset.is_empty() {
        return String::new();
    }
    let length = fastrand::usize(min_len..=max_len);
    (0..length)
        .map(|_| charset[fastrand::usize(..charset.len())])
        .collect()
}

/// Generate `number` random words, see [`random_word`].
pub fn random_words(symbols: usize, min_len: usize, max_len: usize, number: usize) -> Vec<String> {
    (0..number)
        .map(|_| random_word(symbols, min_len, max_len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_automata_have_requested_shape() {
        fastrand::seed(7);
        let nfa = random_nfa(3, 6, 0.2, 0.1);
        assert_eq!(nfa.size(), 6);
        assert_eq!(nfa.initials().count(), 1);
        assert!(nfa.alphabet().iter().all(|sym| letters(3).contains(sym)));

        let dense = random_nfa(2, 3, 1.0, 0.0);
        assert_eq!(dense.transition_count(), 2 * 3 * 3);
        assert!(dense.transitions().all(|t| !t.is_silent()));
    }

    #[test]
    fn random_words_respect_bounds() {
        fastrand::seed(11);
        for w in random_words(2, 1, 4, 50) {
            assert!((1..=4).contains(&w.len()));
            assert!(w.chars().all(|c| c == 'a' || c == 'b'));
        }
        assert_eq!(random_word(0, 3, 5), "");
    }
}
