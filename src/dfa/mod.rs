use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::error::AutomatonError;
use crate::nfa::Nfa;

/// Represent a deterministic finite automaton over opaque states `Q` and
/// symbols `S`.
///
/// The transition function is partial: a missing `(state, symbol)` entry
/// means there is no move, and an input that hits it is rejected.
#[derive(Clone, Debug)]
pub struct Dfa<Q, S> {
    states: AHashSet<Q>,
    alphabet: AHashSet<S>,
    transitions: AHashMap<Q, AHashMap<S, Q>>,
    start: Q,
    accept: AHashSet<Q>,
}

impl<Q, S> Dfa<Q, S>
where
    Q: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    /// Build a DFA from its declarative parts.
    ///
    /// Transitions are given as `(from, symbol, to)` triples. Construction
    /// fails fast when a part refers to an undeclared state or symbol, or
    /// when two triples send the same `(state, symbol)` pair to different
    /// states.
    ///
    /// # Example:
    ///
    /// ```
    /// use finite_automata::Dfa;
    ///
    /// // accepts b*aa*
    /// let dfa = Dfa::new(
    ///     0..=2,
    ///     ['a', 'b'],
    ///     [
    ///         (0, 'a', 1),
    ///         (0, 'b', 0),
    ///         (1, 'a', 1),
    ///         (1, 'b', 2),
    ///         (2, 'a', 2),
    ///         (2, 'b', 2),
    ///     ],
    ///     0,
    ///     [1],
    /// )
    /// .unwrap();
    ///
    /// assert!(dfa.accepts(&['b', 'b', 'a', 'a']));
    /// assert!(!dfa.accepts(&['b']));
    /// ```
    pub fn new<QI, SI, TI, FI>(
        states: QI,
        alphabet: SI,
        transitions: TI,
        start: Q,
        accept: FI,
    ) -> Result<Self, AutomatonError>
    where
        QI: IntoIterator<Item = Q>,
        SI: IntoIterator<Item = S>,
        TI: IntoIterator<Item = (Q, S, Q)>,
        FI: IntoIterator<Item = Q>,
    {
        let states: AHashSet<Q> = states.into_iter().collect();
        let alphabet: AHashSet<S> = alphabet.into_iter().collect();

        if !states.contains(&start) {
            return Err(AutomatonError::UnknownStartState);
        }

        let accept: AHashSet<Q> = accept.into_iter().collect();
        if accept.iter().any(|state| !states.contains(state)) {
            return Err(AutomatonError::UnknownAcceptState);
        }

        let mut table: AHashMap<Q, AHashMap<S, Q>> = AHashMap::new();
        for (from, symbol, to) in transitions {
            if !states.contains(&from) || !states.contains(&to) {
                return Err(AutomatonError::UnknownTransitionState);
            }
            if !alphabet.contains(&symbol) {
                return Err(AutomatonError::UnknownTransitionSymbol);
            }
            match table.entry(from).or_default().entry(symbol) {
                Entry::Occupied(o) => {
                    if *o.get() != to {
                        return Err(AutomatonError::ConflictingTransition);
                    }
                }
                Entry::Vacant(v) => {
                    v.insert(to);
                }
            }
        }

        Ok(Dfa {
            states,
            alphabet,
            transitions: table,
            start,
            accept,
        })
    }

    pub(crate) fn from_parts(
        states: AHashSet<Q>,
        alphabet: AHashSet<S>,
        transitions: AHashMap<Q, AHashMap<S, Q>>,
        start: Q,
        accept: AHashSet<Q>,
    ) -> Self {
        Dfa {
            states,
            alphabet,
            transitions,
            start,
            accept,
        }
    }

    /// Return `true` if the automaton accepts the input sequence.
    ///
    /// The walk is deterministic; the first undefined transition rejects
    /// the whole input regardless of what follows.
    pub fn accepts(&self, input: &[S]) -> bool {
        let mut current = &self.start;
        for symbol in input {
            match self
                .transitions
                .get(current)
                .and_then(|by_symbol| by_symbol.get(symbol))
            {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.accept.contains(current)
    }

    /// Lift into an NFA with singleton target sets and no epsilon edges.
    pub fn to_nfa(&self) -> Nfa<Q, S> {
        let mut transitions: AHashMap<Q, AHashMap<S, AHashSet<Q>>> =
            AHashMap::with_capacity(self.transitions.len());
        for (from, by_symbol) in &self.transitions {
            let lifted = by_symbol
                .iter()
                .map(|(symbol, to)| {
                    let mut targets = AHashSet::with_capacity(1);
                    targets.insert(to.clone());
                    (symbol.clone(), targets)
                })
                .collect();
            transitions.insert(from.clone(), lifted);
        }

        Nfa::from_parts(
            self.states.clone(),
            self.alphabet.clone(),
            transitions,
            AHashMap::new(),
            self.start.clone(),
            self.accept.clone(),
        )
    }

    #[inline]
    pub fn transition(&self, from: &Q, symbol: &S) -> Option<&Q> {
        self.transitions
            .get(from)
            .and_then(|by_symbol| by_symbol.get(symbol))
    }

    #[inline]
    pub fn get_states(&self) -> &AHashSet<Q> {
        &self.states
    }

    #[inline]
    pub fn get_alphabet(&self) -> &AHashSet<S> {
        &self.alphabet
    }

    #[inline]
    pub fn get_start_state(&self) -> &Q {
        &self.start
    }

    #[inline]
    pub fn get_accept_states(&self) -> &AHashSet<Q> {
        &self.accept
    }

    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_accept(&self, state: &Q) -> bool {
        self.accept.contains(state)
    }
}

// Not derived: the hash-keyed fields compare equal only under
// `Q: Eq + Hash` and `S: Eq + Hash`, which the derive would not require.
impl<Q, S> PartialEq for Dfa<Q, S>
where
    Q: Eq + Hash,
    S: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.alphabet == other.alphabet
            && self.transitions == other.transitions
            && self.start == other.start
            && self.accept == other.accept
    }
}

impl<Q, S> Eq for Dfa<Q, S>
where
    Q: Eq + Hash,
    S: Eq + Hash,
{
}

impl<Q, S> Display for Dfa<Q, S>
where
    Q: Clone + Eq + Hash + Display,
    S: Clone + Eq + Hash + Display,
{
    fn fmt(&self, sb: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(sb, "digraph Automaton {{")?;
        writeln!(sb, "\trankdir = LR;")?;
        for from_state in &self.states {
            if self.accept.contains(from_state) {
                writeln!(sb, "\t\"{}\" [shape=doublecircle];", from_state)?;
            } else {
                writeln!(sb, "\t\"{}\" [shape=circle];", from_state)?;
            }

            if &self.start == from_state {
                writeln!(sb, "\tinitial [shape=plaintext,label=\"\"];")?;
                writeln!(sb, "\tinitial -> \"{}\"", from_state)?;
            }
            if let Some(by_symbol) = self.transitions.get(from_state) {
                for (symbol, to_state) in by_symbol {
                    writeln!(
                        sb,
                        "\t\"{}\" -> \"{}\" [label=\"{}\"]",
                        from_state, to_state, symbol
                    )?;
                }
            }
        }
        write!(sb, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(input: &str) -> Vec<char> {
        input.chars().collect()
    }

    // b*aa*
    fn example_dfa() -> Dfa<u32, char> {
        Dfa::new(
            0..=2,
            ['a', 'b'],
            [
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 2),
                (2, 'b', 2),
            ],
            0,
            [1],
        )
        .unwrap()
    }

    #[test]
    fn test_accepts() -> Result<(), String> {
        let dfa = example_dfa();

        assert!(dfa.accepts(&symbols("aa")));
        assert!(dfa.accepts(&symbols("bbaa")));
        assert!(dfa.accepts(&symbols("a")));
        assert!(!dfa.accepts(&symbols("b")));
        assert!(!dfa.accepts(&symbols("bbbb")));
        assert!(!dfa.accepts(&symbols("")));

        Ok(())
    }

    #[test]
    fn test_missing_transition_short_circuits() -> Result<(), String> {
        // only 0 -a-> 1 is defined; anything after a 'b' is unreachable
        let dfa = Dfa::new(0..=1, ['a', 'b'], [(0, 'a', 1)], 0, [1]).unwrap();

        assert!(dfa.accepts(&symbols("a")));
        assert!(!dfa.accepts(&symbols("b")));
        assert!(!dfa.accepts(&symbols("baaaa")));
        assert!(!dfa.accepts(&symbols("ab")));

        Ok(())
    }

    #[test]
    fn test_unknown_symbol_rejects() -> Result<(), String> {
        let dfa = example_dfa();

        assert!(!dfa.accepts(&symbols("ax")));

        Ok(())
    }

    #[test]
    fn test_construction_validation() -> Result<(), String> {
        assert_eq!(
            Err(AutomatonError::UnknownStartState),
            Dfa::new([0, 1], ['a'], [(0, 'a', 1)], 7, [1])
        );
        assert_eq!(
            Err(AutomatonError::UnknownAcceptState),
            Dfa::new([0, 1], ['a'], [(0, 'a', 1)], 0, [7])
        );
        assert_eq!(
            Err(AutomatonError::UnknownTransitionState),
            Dfa::new([0, 1], ['a'], [(0, 'a', 7)], 0, [1])
        );
        assert_eq!(
            Err(AutomatonError::UnknownTransitionSymbol),
            Dfa::new([0, 1], ['a'], [(0, 'x', 1)], 0, [1])
        );
        assert_eq!(
            Err(AutomatonError::ConflictingTransition),
            Dfa::new([0, 1], ['a'], [(0, 'a', 1), (0, 'a', 0)], 0, [1])
        );
        // repeating the same triple is not a conflict
        assert!(Dfa::new([0, 1], ['a'], [(0, 'a', 1), (0, 'a', 1)], 0, [1]).is_ok());

        Ok(())
    }

    #[test]
    fn test_to_nfa_agrees() -> Result<(), String> {
        let dfa = example_dfa();
        let nfa = dfa.to_nfa();

        for input in ["abba", "aaaa", "bbbb", "bbaa", "bbbbbbbbbaa", "aa", "a", "b", ""] {
            assert_eq!(
                dfa.accepts(&symbols(input)),
                nfa.accepts(&symbols(input)),
                "'{input}'"
            );
        }

        Ok(())
    }

    #[test]
    fn test_structural_equality() -> Result<(), String> {
        assert_eq!(example_dfa(), example_dfa());
        assert_eq!(example_dfa(), example_dfa().clone());

        // same shape, different accept set
        let other = Dfa::new(
            0..=2,
            ['a', 'b'],
            [
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 2),
                (2, 'b', 2),
            ],
            0,
            [2],
        )
        .unwrap();
        assert_ne!(example_dfa(), other);

        Ok(())
    }

    #[test]
    fn test_display_dot() -> Result<(), String> {
        let dot = example_dfa().to_string();

        assert!(dot.starts_with("digraph Automaton {"));
        assert!(dot.contains("\"1\" [shape=doublecircle];"));
        assert!(dot.contains("initial -> \"0\""));
        assert!(dot.ends_with('}'));

        Ok(())
    }
}
