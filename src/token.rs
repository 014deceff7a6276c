use std::{fmt::Debug, hash::Hash};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Position, SequenceId, TokenKindGroup, TokenMatch, TokenSequence};

/// The requirements for a token kind.
///
/// Token kinds are usually fieldless enums, but any small value type works, e.g. `usize` token
/// type numbers.
pub trait TokenKind: Copy + Eq + Hash + Debug {}

// Implement the trait for all types that implement the required traits.
impl<T: Copy + Eq + Hash + Debug> TokenKind for T {}

/// A classified, positioned slice of the input text.
///
/// A token that was added to a [TokenSequence] remembers the id of that sequence. The id is only
/// a lookup handle, it doesn't keep the sequence alive. Cloning a token yields a copy that belongs
/// to no sequence.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token<K> {
    kind: K,
    text: String,
    raw_text: String,
    index: usize,
    line_number: usize,
    line_index: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    owner: Option<SequenceId>,
}

impl<K: TokenKind> Token<K> {
    /// Create a new token that belongs to no sequence.
    pub fn new(
        kind: K,
        text: impl Into<String>,
        index: usize,
        line_number: usize,
        line_index: usize,
    ) -> Self {
        let text = text.into();
        Self {
            kind,
            raw_text: text.clone(),
            text,
            index,
            line_number,
            line_index,
            owner: None,
        }
    }

    /// Get the token kind.
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Get the text of the token. It differs from the raw text if a hook edited it.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the text exactly as it was matched.
    #[inline]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The byte offset of the token in the input.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The 1-based line number of the token.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The 0-based byte offset of the token within its line.
    #[inline]
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// The position of the start of the token.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line_number, self.line_index)
    }

    /// The length of the token text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Checks if the token text is empty. This can only happen if a hook cleared it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `index + len`.
    #[inline]
    pub fn right_index(&self) -> usize {
        self.index + self.len()
    }

    /// `line_index + len`.
    #[inline]
    pub fn right_line_index(&self) -> usize {
        self.line_index + self.len()
    }

    /// The byte range of the raw text in the input.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.index..self.index + self.raw_text.len()
    }

    /// Checks if the token is of the given kind.
    #[inline]
    pub fn is_kind(&self, kind: K) -> bool {
        self.kind == kind
    }

    /// Checks if the kind of the token is a member of the given group.
    #[inline]
    pub fn is_member_of(&self, group: &TokenKindGroup<K>) -> bool {
        group.contains(self.kind)
    }

    /// The distance of the start offsets of both tokens in bytes.
    pub fn distance(&self, other: &Token<K>) -> usize {
        self.index.abs_diff(other.index)
    }

    /// Checks if this token starts before the other one.
    #[inline]
    pub fn is_before(&self, other: &Token<K>) -> bool {
        self.index < other.index
    }

    /// Checks if this token starts after the other one.
    #[inline]
    pub fn is_after(&self, other: &Token<K>) -> bool {
        self.index > other.index
    }

    /// Checks if both tokens are adjacent in the input. The raw texts are used for this, so hook
    /// edits don't matter.
    pub fn is_neighbor(&self, other: &Token<K>) -> bool {
        if self.is_before(other) {
            self.range().end == other.index
        } else {
            other.range().end == self.index
        }
    }

    /// The id of the sequence the token belongs to.
    ///
    /// The id is a plain handle, the token holds no reference to the sequence. Queries like "next",
    /// "previous" or "is last" are therefore asked on the sequence, e.g.
    /// [TokenSequence::next], which checks this id before it looks the token up.
    #[inline]
    pub fn owner(&self) -> Option<SequenceId> {
        self.owner
    }

    /// Checks if the token belongs to the given sequence.
    #[inline]
    pub fn is_owned_by(&self, sequence: &TokenSequence<K>) -> bool {
        self.owner == Some(sequence.id())
    }

    #[inline]
    pub(crate) fn set_owner(&mut self, owner: Option<SequenceId>) {
        self.owner = owner;
    }
}

impl<K: Clone> Clone for Token<K> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            text: self.text.clone(),
            raw_text: self.raw_text.clone(),
            index: self.index,
            line_number: self.line_number,
            line_index: self.line_index,
            owner: None,
        }
    }
}

// The owner is a lookup handle and not part of the token's value.
impl<K: PartialEq> PartialEq for Token<K> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.text == other.text
            && self.raw_text == other.raw_text
            && self.index == other.index
            && self.line_number == other.line_number
            && self.line_index == other.line_index
    }
}

impl<K: Eq> Eq for Token<K> {}

impl<K: TokenKind> From<TokenMatch<K>> for Token<K> {
    fn from(token_match: TokenMatch<K>) -> Self {
        let mut token = Token::new(
            token_match.kind(),
            token_match.raw_text(),
            token_match.index(),
            token_match.line_number(),
            token_match.line_index(),
        );
        token.text = token_match.text().to_string();
        token
    }
}

impl<K> std::fmt::Display for Token<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?}: '{}' ({}:{})",
            self.kind,
            self.text.escape_default(),
            self.line_number,
            self.line_index
        )
    }
}
