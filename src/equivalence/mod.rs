use std::hash::Hash;

use log::debug;
use rand::Rng;

use crate::dfa::Dfa;
use crate::nfa::Nfa;

/// Check that a DFA and an NFA agree on every sequence of the sample.
///
/// Returns `false` on the first disagreement. This is a sampling check,
/// not a proof: agreement on the sample says nothing about sequences
/// outside it.
///
/// # Example:
///
/// ```
/// use finite_automata::{equivalence, Nfa};
///
/// let nfa = Nfa::new(
///     0..=2,
///     ['0', '1'],
///     [(0, '0', 1), (1, '1', 2), (2, '0', 0)],
///     [(2, 0)],
///     0,
///     [0],
/// )
/// .unwrap();
/// let dfa = nfa.to_deterministic();
///
/// let samples = vec![vec!['0', '1'], vec!['0', '1', '0'], vec!['1']];
/// assert!(equivalence::check_equivalence(&dfa, &nfa, &samples));
/// ```
pub fn check_equivalence<Q, P, S>(dfa: &Dfa<Q, S>, nfa: &Nfa<P, S>, sequences: &[Vec<S>]) -> bool
where
    Q: Clone + Eq + Hash,
    P: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    for (index, sequence) in sequences.iter().enumerate() {
        if dfa.accepts(sequence) != nfa.accepts(sequence) {
            debug!(
                "automata disagree on sample {} (length {})",
                index,
                sequence.len()
            );
            return false;
        }
    }
    true
}

/// Draw `count` random sequences over `alphabet`, each of length at most
/// `max_len`. Useful for feeding [`check_equivalence`] with inputs nobody
/// thought of.
pub fn random_sequences<S, R>(
    alphabet: &[S],
    count: usize,
    max_len: usize,
    rng: &mut R,
) -> Vec<Vec<S>>
where
    S: Clone,
    R: Rng + ?Sized,
{
    if alphabet.is_empty() {
        return vec![Vec::new(); count];
    }
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..=max_len);
            (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())].clone())
                .collect()
        })
        .collect()
}
