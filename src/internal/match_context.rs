use crate::{ParseFailure, PatternSnapshot, Position, TokenKind};

use super::LineTable;

/// The isolated state of one tokenization session.
///
/// A context is created by every call of [crate::Tokenizer::tokenize] and by every
/// [crate::SteppingCursor]. It is never shared between sessions.
#[derive(Debug, Clone)]
pub(crate) struct MatchContext<'h, K> {
    pub(crate) text: &'h str,
    pub(crate) line_table: LineTable,
    pub(crate) index: usize,
    pub(crate) line_number: usize,
    pub(crate) line_index: usize,
    pub(crate) patterns: PatternSnapshot<K>,
}

impl<'h, K: TokenKind> MatchContext<'h, K> {
    pub(crate) fn new(text: &'h str, patterns: PatternSnapshot<K>) -> Self {
        Self {
            text,
            line_table: LineTable::new(text),
            index: 0,
            line_number: 1,
            line_index: 0,
            patterns,
        }
    }

    #[inline]
    pub(crate) fn has_next(&self) -> bool {
        self.index < self.text.len()
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position::new(self.line_number, self.line_index)
    }

    /// Moves the position counters forward by `length` bytes.
    pub(crate) fn advance_by(&mut self, length: usize) {
        self.index += length;
        self.line_index += length;
        if self.index >= self.line_table.next_line_start(self.line_number) {
            // The match ended on or crossed a line start.
            let position = self.line_table.position(self.index);
            self.line_number = position.line;
            self.line_index = position.column;
        }
    }

    /// Restores the position counters to a previously recorded position.
    pub(crate) fn rewind_to(&mut self, index: usize, line_number: usize, line_index: usize) {
        debug_assert_eq!(
            self.line_table.position(index),
            Position::new(line_number, line_index)
        );
        self.index = index;
        self.line_number = line_number;
        self.line_index = line_index;
    }

    pub(crate) fn reset(&mut self) {
        self.rewind_to(0, 1, 0);
    }

    /// The text of the current line.
    pub(crate) fn line_text(&self) -> &'h str {
        self.line_table.line_text(self.text, self.line_number)
    }

    /// Creates the lexical error for the current position.
    pub(crate) fn parse_failure(&self) -> ParseFailure {
        ParseFailure::new(
            self.text.to_string(),
            self.line_text().to_string(),
            self.index,
            self.line_number,
            self.line_index,
        )
    }
}
