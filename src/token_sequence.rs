use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Token, TokenKind, TokenMatch};

static NEXT_SEQUENCE_ID: AtomicU64 = AtomicU64::new(1);

/// The identity of a [TokenSequence].
/// Tokens store it as a non-owning handle to the sequence they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(u64);

impl SequenceId {
    fn next() -> Self {
        SequenceId(NEXT_SEQUENCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the id as u64.
    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// An ordered collection of tokens in document order.
///
/// Every token in the sequence carries the id of the sequence. Adding a token sets the id,
/// removing a token clears it. Indices are stable until the next removal or swap.
///
/// Queries relative to a token (`next`, `prev`, `is_last`) find the token by identity, so they
/// only answer for tokens that are actually stored in this sequence.
#[derive(Debug)]
pub struct TokenSequence<K> {
    id: SequenceId,
    tokens: Vec<Token<K>>,
}

impl<K> Default for TokenSequence<K> {
    fn default() -> Self {
        Self {
            id: SequenceId::next(),
            tokens: Vec::new(),
        }
    }
}

impl<K: TokenKind> TokenSequence<K> {
    /// Creates an empty sequence with a fresh id.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of this sequence.
    #[inline]
    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Appends a token and makes this sequence its owner.
    pub fn push(&mut self, mut token: Token<K>) {
        token.set_owner(Some(self.id));
        self.tokens.push(token);
    }

    /// Converts the match into a token and appends it.
    pub fn push_match(&mut self, token_match: TokenMatch<K>) {
        self.push(token_match.into());
    }

    /// Removes the last token and returns it without owner.
    pub fn pop(&mut self) -> Option<Token<K>> {
        let mut token = self.tokens.pop()?;
        token.set_owner(None);
        Some(token)
    }

    /// Removes the token at the given index and returns it without owner.
    /// Returns `None` if the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Token<K>> {
        if index >= self.tokens.len() {
            return None;
        }
        let mut token = self.tokens.remove(index);
        token.set_owner(None);
        Some(token)
    }

    /// Removes the first token that equals the given one and returns it without owner.
    /// Since tokens carry their offset, this is usually the token at the same place in the input.
    pub fn remove_token(&mut self, token: &Token<K>) -> Option<Token<K>> {
        let index = self.tokens.iter().position(|t| t == token)?;
        self.remove(index)
    }

    /// Removes all tokens.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Get the token at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<K>> {
        self.tokens.get(index)
    }

    /// Get the first token.
    #[inline]
    pub fn first(&self) -> Option<&Token<K>> {
        self.tokens.first()
    }

    /// Get the last token.
    #[inline]
    pub fn last(&self) -> Option<&Token<K>> {
        self.tokens.last()
    }

    /// Get the token `n` places before the last one. `last_nth(0)` is the last token.
    pub fn last_nth(&self, n: usize) -> Option<&Token<K>> {
        let index = self.tokens.len().checked_sub(n + 1)?;
        self.tokens.get(index)
    }

    /// The index of the given token in this sequence.
    pub fn position_of(&self, token: &Token<K>) -> Option<usize> {
        if !token.is_owned_by(self) {
            return None;
        }
        self.tokens.iter().position(|t| std::ptr::eq(t, token))
    }

    /// The token following the given one.
    pub fn next(&self, token: &Token<K>) -> Option<&Token<K>> {
        let index = self.position_of(token)?;
        self.tokens.get(index + 1)
    }

    /// The token preceding the given one.
    pub fn prev(&self, token: &Token<K>) -> Option<&Token<K>> {
        let index = self.position_of(token)?;
        self.tokens.get(index.checked_sub(1)?)
    }

    /// Checks if the given token is the last one of this sequence.
    pub fn is_last(&self, token: &Token<K>) -> bool {
        self.last().is_some_and(|last| std::ptr::eq(last, token))
    }

    /// The distance between both tokens in number of tokens.
    /// The distance of a token to itself is 0, to its neighbor 1.
    pub fn distance(&self, a: &Token<K>, b: &Token<K>) -> Option<usize> {
        Some(self.position_of(a)?.abs_diff(self.position_of(b)?))
    }

    /// Swaps the tokens at the given indices.
    ///
    /// # Panics
    /// Panics if one of the indices is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.tokens.swap(a, b);
    }

    /// Swaps the first tokens that equal the given ones.
    /// Returns false and leaves the sequence unchanged if one of them is not found.
    ///
    /// Tokens are found by equality, so the arguments are usually copies of the tokens stored in
    /// this sequence.
    pub fn swap_tokens(&mut self, a: &Token<K>, b: &Token<K>) -> bool {
        let (Some(first), Some(second)) = (
            self.tokens.iter().position(|t| t == a),
            self.tokens.iter().position(|t| t == b),
        ) else {
            return false;
        };
        self.tokens.swap(first, second);
        true
    }

    /// The number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the tokens in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token<K>> {
        self.tokens.iter()
    }

    /// Get the tokens as slice.
    #[inline]
    pub fn as_slice(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// Consumes the sequence and returns its tokens without owner.
    pub fn into_tokens(self) -> Vec<Token<K>> {
        let mut tokens = self.tokens;
        tokens.iter_mut().for_each(|t| t.set_owner(None));
        tokens
    }
}

impl<K: TokenKind> Clone for TokenSequence<K> {
    /// The clone is a distinct sequence with a fresh id. Its tokens belong to the clone.
    fn clone(&self) -> Self {
        let mut sequence = Self::new();
        self.tokens
            .iter()
            .for_each(|token| sequence.push(token.clone()));
        sequence
    }
}

impl<K> std::ops::Index<usize> for TokenSequence<K> {
    type Output = Token<K>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a, K> IntoIterator for &'a TokenSequence<K> {
    type Item = &'a Token<K>;
    type IntoIter = std::slice::Iter<'a, Token<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<K: TokenKind> IntoIterator for TokenSequence<K> {
    type Item = Token<K>;
    type IntoIter = std::vec::IntoIter<Token<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_tokens().into_iter()
    }
}

impl<K: TokenKind> FromIterator<Token<K>> for TokenSequence<K> {
    fn from_iter<I: IntoIterator<Item = Token<K>>>(iter: I) -> Self {
        let mut sequence = Self::new();
        iter.into_iter().for_each(|token| sequence.push(token));
        sequence
    }
}
