#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Position, TokenKind};

/// The result of one successful pattern match before it becomes a [crate::Token].
///
/// A pre-insertion hook receives the match mutably. It can replace the text that will be stored
/// in the token, e.g. to strip quotes, and it can cancel the insertion. The raw text always keeps
/// the text exactly as it was matched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenMatch<K> {
    kind: K,
    text: String,
    raw_text: String,
    index: usize,
    line_number: usize,
    line_index: usize,
    cancelled: bool,
}

impl<K: TokenKind> TokenMatch<K> {
    pub(crate) fn new(
        kind: K,
        raw_text: &str,
        index: usize,
        line_number: usize,
        line_index: usize,
    ) -> Self {
        Self {
            kind,
            text: raw_text.to_string(),
            raw_text: raw_text.to_string(),
            index,
            line_number,
            line_index,
            cancelled: false,
        }
    }

    /// Get the token kind.
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Get the current text, possibly edited by a hook.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text that will be stored in the token.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Get mutable access to the text that will be stored in the token.
    #[inline]
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Get the text exactly as it was matched.
    #[inline]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The byte offset of the match in the input.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The 1-based line number of the start of the match.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The 0-based byte offset of the start of the match within its line.
    #[inline]
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// The position of the start of the match.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line_number, self.line_index)
    }

    /// The length of the matched input in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw_text.len()
    }

    /// Always false, empty matches are never produced.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }

    /// Prevents the match from being added to the token sequence.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Checks if the match was cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
