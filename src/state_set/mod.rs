use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// An immutable, order-independent, deduplicated set of automaton states.
///
/// The subset construction uses values of this type as single
/// deterministic states. Equality and hashing are structural: two subsets
/// assembled in different orders compare equal and hash identically,
/// because the members are kept in a canonical sorted representation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateSet<Q>(BTreeSet<Q>);

impl<Q: Ord> StateSet<Q> {
    #[inline]
    pub fn new() -> Self {
        StateSet(BTreeSet::new())
    }

    #[inline]
    pub fn contains(&self, state: &Q) -> bool {
        self.0.contains(state)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> btree_set::Iter<'_, Q> {
        self.0.iter()
    }
}

impl<Q: Ord> Default for StateSet<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: Ord> FromIterator<Q> for StateSet<Q> {
    fn from_iter<I: IntoIterator<Item = Q>>(iter: I) -> Self {
        StateSet(iter.into_iter().collect())
    }
}

impl<'a, Q: Ord> IntoIterator for &'a StateSet<Q> {
    type Item = &'a Q;
    type IntoIter = btree_set::Iter<'a, Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<Q: Ord> IntoIterator for StateSet<Q> {
    type Item = Q;
    type IntoIter = btree_set::IntoIter<Q>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<Q: Ord + fmt::Display> fmt::Display for StateSet<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, state) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", state)?;
        }
        write!(f, "}}")
    }
}
