use rustc_hash::FxHashSet;

use crate::TokenKind;

/// An unordered set of token kinds used for membership tests, e.g. "is this an opening
/// bracket".
#[derive(Debug, Clone)]
pub struct TokenKindGroup<K> {
    kinds: FxHashSet<K>,
}

impl<K> Default for TokenKindGroup<K> {
    fn default() -> Self {
        Self {
            kinds: FxHashSet::default(),
        }
    }
}

impl<K: TokenKind> TokenKindGroup<K> {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a kind. Returns false if it was already a member.
    pub fn insert(&mut self, kind: K) -> bool {
        self.kinds.insert(kind)
    }

    /// Removes a kind. Returns false if it was not a member.
    pub fn remove(&mut self, kind: K) -> bool {
        self.kinds.remove(&kind)
    }

    /// Checks if the kind is a member of the group.
    #[inline]
    pub fn contains(&self, kind: K) -> bool {
        self.kinds.contains(&kind)
    }

    /// The number of kinds in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Checks if the group is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterates over the kinds in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.kinds.iter().copied()
    }
}

impl<K: TokenKind> PartialEq for TokenKindGroup<K> {
    fn eq(&self, other: &Self) -> bool {
        self.kinds == other.kinds
    }
}

impl<K: TokenKind> Eq for TokenKindGroup<K> {}

impl<K: TokenKind> FromIterator<K> for TokenKindGroup<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}

impl<K: TokenKind, const N: usize> From<[K; N]> for TokenKindGroup<K> {
    fn from(kinds: [K; N]) -> Self {
        kinds.into_iter().collect()
    }
}
