use std::hash::Hash;

use ahash::{AHashMap, AHashSet};

/// Compute the transitive closure of the direct epsilon relation for every
/// declared state.
///
/// Worklist fixpoint: pop a target not yet in the closure, record it, push
/// its own direct targets. A recorded state is never pushed again, so the
/// traversal terminates on epsilon cycles. The closure of a state excludes
/// the state itself unless a cycle leads back to it.
pub(crate) fn epsilon_closures<Q>(
    states: &AHashSet<Q>,
    epsilon: &AHashMap<Q, AHashSet<Q>>,
) -> AHashMap<Q, AHashSet<Q>>
where
    Q: Clone + Eq + Hash,
{
    let mut closures = AHashMap::with_capacity(states.len());
    for state in states {
        let mut closure = AHashSet::new();
        let mut worklist: Vec<&Q> = match epsilon.get(state) {
            Some(targets) => targets.iter().collect(),
            None => Vec::new(),
        };
        while let Some(target) = worklist.pop() {
            if closure.insert(target.clone()) {
                if let Some(onward) = epsilon.get(target) {
                    worklist.extend(onward.iter());
                }
            }
        }
        closures.insert(state.clone(), closure);
    }
    closures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(edges: &[(u32, u32)]) -> AHashMap<u32, AHashSet<u32>> {
        let mut relation: AHashMap<u32, AHashSet<u32>> = AHashMap::new();
        for &(from, to) in edges {
            relation.entry(from).or_default().insert(to);
        }
        relation
    }

    fn states(universe: impl IntoIterator<Item = u32>) -> AHashSet<u32> {
        universe.into_iter().collect()
    }

    #[test]
    fn test_chain_is_transitively_closed() -> Result<(), String> {
        let closures = epsilon_closures(&states(0..=3), &relation(&[(0, 1), (1, 2), (2, 3)]));

        assert_eq!(states([1, 2, 3]), closures[&0]);
        assert_eq!(states([2, 3]), closures[&1]);
        assert_eq!(states([3]), closures[&2]);
        assert_eq!(states([]), closures[&3]);

        Ok(())
    }

    #[test]
    fn test_self_excluded_without_cycle() -> Result<(), String> {
        let closures = epsilon_closures(&states(0..=1), &relation(&[(0, 1)]));

        assert!(!closures[&0].contains(&0));
        assert!(!closures[&1].contains(&1));

        Ok(())
    }

    #[test]
    fn test_cycle_terminates_and_includes_both() -> Result<(), String> {
        // x and y point at each other; each closure contains the other
        // and, through the cycle, the state itself
        let closures = epsilon_closures(&states(0..=1), &relation(&[(0, 1), (1, 0)]));

        assert_eq!(states([0, 1]), closures[&0]);
        assert_eq!(states([0, 1]), closures[&1]);

        Ok(())
    }

    #[test]
    fn test_transitivity() -> Result<(), String> {
        let universe = states(0..=4);
        let closures = epsilon_closures(&universe, &relation(&[(0, 1), (1, 2), (2, 0), (3, 0)]));

        for state in &universe {
            for reached in &closures[state] {
                assert!(
                    closures[reached].is_subset(&closures[state]),
                    "closure of {reached} escapes closure of {state}"
                );
            }
        }

        Ok(())
    }

    #[test]
    fn test_idempotence() -> Result<(), String> {
        let universe = states(0..=3);
        let relation = relation(&[(0, 1), (1, 2), (2, 1), (3, 3)]);

        assert_eq!(
            epsilon_closures(&universe, &relation),
            epsilon_closures(&universe, &relation)
        );

        Ok(())
    }
}
