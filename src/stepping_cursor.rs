use log::trace;

use crate::{
    internal::{find_match, try_match, MatchContext},
    PatternSnapshot, Position, PositionProvider, Token, TokenKind, TokenSequence,
};

/// A cursor that tokenizes its input one token at a time and can step back.
///
/// The cursor is created by [crate::Tokenizer::create_stepping_cursor]. It owns a snapshot of the
/// tokenizer's patterns and a history of the tokens it produced. Every `advance` pushes the new
/// token onto the history, every `retreat` pops it and moves the cursor back to where that token
/// started.
///
/// Failed matches are not errors here. `advance` simply returns `None` and leaves the cursor where
/// it is, which makes speculative lookahead cheap.
///
/// Hooks of the tokenizer are not applied.
#[derive(Debug)]
pub struct SteppingCursor<'h, K> {
    context: MatchContext<'h, K>,
    history: TokenSequence<K>,
}

impl<'h, K: TokenKind> SteppingCursor<'h, K> {
    pub(crate) fn new(context: MatchContext<'h, K>) -> Self {
        Self {
            context,
            history: TokenSequence::new(),
        }
    }

    /// Checks if there is input left to tokenize.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.context.has_next()
    }

    /// Tokenizes the next token with any pattern.
    ///
    /// Returns `None` without moving if no pattern matches at the current position or the end of
    /// the input is reached.
    pub fn advance(&mut self) -> Option<&Token<K>> {
        self.step(None)
    }

    /// Tokenizes the next token only if it is of the given kind.
    ///
    /// Returns `None` without moving if the input at the current position doesn't match the
    /// pattern of this kind.
    pub fn advance_kind(&mut self, kind: K) -> Option<&Token<K>> {
        self.step(Some(kind))
    }

    /// Checks if the input at the current position matches the pattern of the given kind.
    /// The cursor is not moved.
    pub fn peek_matches(&self, kind: K) -> bool {
        find_match(&self.context, Some(kind)).is_some()
    }

    /// Undoes the last step.
    ///
    /// The cursor moves back to the start of the token that is undone. Returns the new current
    /// token, i.e. the one before the undone token, or `None` if the history is empty now.
    pub fn retreat(&mut self) -> Option<&Token<K>> {
        let Some(undone) = self.history.pop() else {
            self.context.reset();
            return None;
        };
        self.context
            .rewind_to(undone.index(), undone.line_number(), undone.line_index());
        trace!("Retreat to {}: undone {}", self.context.position(), undone);
        self.history.last()
    }

    /// Moves the cursor back to the start of the input and clears the history.
    pub fn reset(&mut self) {
        self.context.reset();
        self.history.clear();
    }

    /// The token produced by the last step.
    #[inline]
    pub fn current(&self) -> Option<&Token<K>> {
        self.history.last()
    }

    /// The tokens produced so far, in document order.
    #[inline]
    pub fn history(&self) -> &TokenSequence<K> {
        &self.history
    }

    /// The byte offset of the cursor in the input.
    #[inline]
    pub fn index(&self) -> usize {
        self.context.index
    }

    /// The line and column of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.context.position()
    }

    /// The text of the line the cursor is in.
    pub fn line_text(&self) -> &'h str {
        self.context.line_text()
    }

    /// The input text.
    #[inline]
    pub fn text(&self) -> &'h str {
        self.context.text
    }

    /// The patterns the cursor works with.
    #[inline]
    pub fn patterns(&self) -> &PatternSnapshot<K> {
        &self.context.patterns
    }

    fn step(&mut self, expected: Option<K>) -> Option<&Token<K>> {
        if !self.context.has_next() {
            return None;
        }
        let token_match = try_match(&self.context, expected)?;
        self.context.advance_by(token_match.len());
        trace!("Step to {}", self.context.position());
        self.history.push_match(token_match);
        self.history.last()
    }
}

impl<K: TokenKind> PositionProvider for SteppingCursor<'_, K> {
    fn position(&self, offset: usize) -> Position {
        self.context.line_table.position(offset)
    }
}

impl<K: TokenKind> Iterator for SteppingCursor<'_, K> {
    type Item = Token<K>;

    /// Advances the cursor and yields a copy of the new token.
    /// Iteration stops at the end of the input or at the first position no pattern matches.
    fn next(&mut self) -> Option<Self::Item> {
        self.advance().cloned()
    }
}
