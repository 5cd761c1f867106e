use std::fmt::Display;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

use crate::error::AutomatonError;

mod closure;
mod determinize;

/// Represent a nondeterministic finite automaton with epsilon transitions
/// over opaque states `Q` and symbols `S`.
///
/// The epsilon closure of every state is computed once, at construction,
/// and cached for the lifetime of the automaton. By convention a state is
/// not part of its own closure unless an epsilon cycle leads back to it;
/// the simulation and the subset construction add the state back at every
/// site where a closure is consumed.
#[derive(Clone, Debug)]
pub struct Nfa<Q, S> {
    states: AHashSet<Q>,
    alphabet: AHashSet<S>,
    transitions: AHashMap<Q, AHashMap<S, AHashSet<Q>>>,
    epsilon: AHashMap<Q, AHashSet<Q>>,
    closure: AHashMap<Q, AHashSet<Q>>,
    start: Q,
    accept: AHashSet<Q>,
}

impl<Q, S> Nfa<Q, S>
where
    Q: Clone + Eq + Hash,
    S: Clone + Eq + Hash,
{
    /// Build an NFA from its declarative parts.
    ///
    /// Transitions are given as `(from, symbol, to)` triples; repeated
    /// triples for the same `(from, symbol)` pair accumulate into the
    /// target set. Epsilon edges are given as `(from, to)` pairs.
    /// Construction fails fast when a part refers to an undeclared state
    /// or symbol.
    ///
    /// # Example:
    ///
    /// ```
    /// use finite_automata::Nfa;
    ///
    /// // accepts (010|01)*
    /// let nfa = Nfa::new(
    ///     0..=2,
    ///     ['0', '1'],
    ///     [(0, '0', 1), (1, '1', 2), (2, '0', 0)],
    ///     [(2, 0)],
    ///     0,
    ///     [0],
    /// )
    /// .unwrap();
    ///
    /// assert!(nfa.accepts(&['0', '1']));
    /// assert!(nfa.accepts(&['0', '1', '0']));
    /// assert!(!nfa.accepts(&['0']));
    /// ```
    pub fn new<QI, SI, TI, EI, FI>(
        states: QI,
        alphabet: SI,
        transitions: TI,
        epsilon: EI,
        start: Q,
        accept: FI,
    ) -> Result<Self, AutomatonError>
    where
        QI: IntoIterator<Item = Q>,
        SI: IntoIterator<Item = S>,
        TI: IntoIterator<Item = (Q, S, Q)>,
        EI: IntoIterator<Item = (Q, Q)>,
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

        let mut table: AHashMap<Q, AHashMap<S, AHashSet<Q>>> = AHashMap::new();
        for (from, symbol, to) in transitions {
            if !states.contains(&from) || !states.contains(&to) {
                return Err(AutomatonError::UnknownTransitionState);
            }
            if !alphabet.contains(&symbol) {
                return Err(AutomatonError::UnknownTransitionSymbol);
            }
            table
                .entry(from)
                .or_default()
                .entry(symbol)
                .or_default()
                .insert(to);
        }

        let mut epsilon_table: AHashMap<Q, AHashSet<Q>> = AHashMap::new();
        for (from, to) in epsilon {
            if !states.contains(&from) || !states.contains(&to) {
                return Err(AutomatonError::UnknownEpsilonState);
            }
            epsilon_table.entry(from).or_default().insert(to);
        }

        Ok(Self::from_parts(
            states,
            alphabet,
            table,
            epsilon_table,
            start,
            accept,
        ))
    }

    pub(crate) fn from_parts(
        states: AHashSet<Q>,
        alphabet: AHashSet<S>,
        transitions: AHashMap<Q, AHashMap<S, AHashSet<Q>>>,
        epsilon: AHashMap<Q, AHashSet<Q>>,
        start: Q,
        accept: AHashSet<Q>,
    ) -> Self {
        let closure = closure::epsilon_closures(&states, &epsilon);
        Nfa {
            states,
            alphabet,
            transitions,
            epsilon,
            closure,
            start,
            accept,
        }
    }

    /// Return `true` if some run of the automaton over the input sequence
    /// ends in an accept state.
    ///
    /// The simulation keeps the whole configuration, the set of states all
    /// live runs occupy at once. A state with no move on the current
    /// symbol contributes nothing; an empty configuration is not an error
    /// and simply keeps rejecting.
    pub fn accepts(&self, input: &[S]) -> bool {
        let mut current = self.closed(&self.start);
        for symbol in input {
            current = self.step(&current, symbol);
        }
        current.iter().any(|state| self.accept.contains(state))
    }

    // The state itself plus everything epsilon-reachable from it.
    pub(crate) fn closed(&self, state: &Q) -> AHashSet<Q> {
        let mut set = AHashSet::new();
        set.insert(state.clone());
        if let Some(closure) = self.closure.get(state) {
            set.extend(closure.iter().cloned());
        }
        set
    }

    // One simulation step: all states reachable from `current` by consuming
    // `symbol`, each reached state counted together with its closure. The
    // subset construction uses the same combination rule.
    pub(crate) fn step<'a, I>(&self, current: I, symbol: &S) -> AHashSet<Q>
    where
        I: IntoIterator<Item = &'a Q>,
        Q: 'a,
    {
        let mut next = AHashSet::new();
        for state in current {
            if let Some(targets) = self
                .transitions
                .get(state)
                .and_then(|by_symbol| by_symbol.get(symbol))
            {
                for target in targets {
                    if let Some(closure) = self.closure.get(target) {
                        next.extend(closure.iter().cloned());
                    }
                    next.insert(target.clone());
                }
            }
        }
        next
    }

    /// The set of states reachable from `state` by one or more epsilon
    /// edges. `None` for a state that was never declared.
    #[inline]
    pub fn epsilon_closure(&self, state: &Q) -> Option<&AHashSet<Q>> {
        self.closure.get(state)
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
impl<Q, S> PartialEq for Nfa<Q, S>
where
    Q: Eq + Hash,
    S: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.alphabet == other.alphabet
            && self.transitions == other.transitions
            && self.epsilon == other.epsilon
            && self.closure == other.closure
            && self.start == other.start
            && self.accept == other.accept
    }
}

impl<Q, S> Eq for Nfa<Q, S>
where
    Q: Eq + Hash,
    S: Eq + Hash,
{
}

impl<Q, S> Display for Nfa<Q, S>
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
                for (symbol, to_states) in by_symbol {
                    for to_state in to_states {
                        writeln!(
                            sb,
                            "\t\"{}\" -> \"{}\" [label=\"{}\"]",
                            from_state, to_state, symbol
                        )?;
                    }
                }
            }
            if let Some(to_states) = self.epsilon.get(from_state) {
                for to_state in to_states {
                    writeln!(
                        sb,
                        "\t\"{}\" -> \"{}\" [label=\"ε\"]",
                        from_state, to_state
                    )?;
                }
            }
        }
        write!(sb, "}}")
    }
}
