use std::collections::VecDeque;
use std::hash::Hash;

use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::dfa::Dfa;
use crate::state_set::StateSet;

use super::Nfa;

impl<Q, S> Nfa<Q, S>
where
    Q: Clone + Eq + Hash + Ord,
    S: Clone + Eq + Hash,
{
    /// Convert to a DFA accepting the same language, with the subset
    /// construction.
    ///
    /// Each deterministic state is a [`StateSet`] of this automaton's
    /// states. Only subsets reachable from the start subset are emitted,
    /// which keeps the state count at what the automaton actually
    /// exercises instead of the full power set. A symbol with no outgoing
    /// move from a subset gets no transition at all rather than an
    /// explicit dead state, so the resulting DFA rejects through its
    /// missing-transition convention.
    ///
    /// # Example:
    ///
    /// ```
    /// use finite_automata::Nfa;
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
    ///
    /// let dfa = nfa.to_deterministic();
    ///
    /// assert!(dfa.accepts(&['0', '1', '0']));
    /// assert!(!dfa.accepts(&['0']));
    /// ```
    pub fn to_deterministic(&self) -> Dfa<StateSet<Q>, S> {
        let start: StateSet<Q> = self.closed(self.get_start_state()).into_iter().collect();

        let mut transitions: AHashMap<StateSet<Q>, AHashMap<S, StateSet<Q>>> = AHashMap::new();
        let mut reachable: AHashSet<StateSet<Q>> = AHashSet::new();
        reachable.insert(start.clone());

        let mut worklist = VecDeque::new();
        worklist.push_back(start.clone());
        while let Some(subset) = worklist.pop_front() {
            for symbol in self.get_alphabet() {
                let targets = self.step(subset.iter(), symbol);
                if targets.is_empty() {
                    continue;
                }
                let target: StateSet<Q> = targets.into_iter().collect();
                if reachable.insert(target.clone()) {
                    worklist.push_back(target.clone());
                }
                transitions
                    .entry(subset.clone())
                    .or_default()
                    .insert(symbol.clone(), target);
            }
        }

        let accept: AHashSet<StateSet<Q>> = reachable
            .iter()
            .filter(|subset| subset.iter().any(|state| self.is_accept(state)))
            .cloned()
            .collect();

        debug!(
            "subset construction turned {} states into {} reachable subsets",
            self.get_number_of_states(),
            reachable.len()
        );

        Dfa::from_parts(
            reachable,
            self.get_alphabet().clone(),
            transitions,
            start,
            accept,
        )
    }
}
