//! Module with the pattern types and their methods.
use log::trace;
use regex_automata::{
    meta::Regex,
    util::syntax,
    Anchored, Input,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{internal::parse_regex_syntax, PatlexError, PatlexErrorKind, Result, TokenKind};

/// Options that control how the text of a pattern is interpreted.
///
/// All flags can also be set inline in the pattern text, e.g. `(?i)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternOptions {
    /// Match letters regardless of their case.
    pub case_insensitive: bool,
    /// `^` and `$` match at the start and end of lines.
    pub multi_line: bool,
    /// `.` also matches `\n`.
    pub dot_matches_new_line: bool,
    /// Whitespace in the pattern text is ignored and `#` starts a comment.
    pub ignore_whitespace: bool,
    /// `\r` is treated as line terminator, too, when `multi_line` is set.
    pub crlf: bool,
    /// Unicode aware character classes.
    pub unicode: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            crlf: false,
            unicode: true,
        }
    }
}

impl PatternOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set case insensitive matching.
    pub fn with_case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Set multi line mode.
    pub fn with_multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    /// Let `.` match `\n`.
    pub fn with_dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    /// Ignore whitespace in the pattern text.
    pub fn with_ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    /// Treat `\r` as line terminator in multi line mode.
    pub fn with_crlf(mut self, yes: bool) -> Self {
        self.crlf = yes;
        self
    }

    /// Enable or disable Unicode mode.
    pub fn with_unicode(mut self, yes: bool) -> Self {
        self.unicode = yes;
        self
    }

    fn syntax_config(&self) -> syntax::Config {
        syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .crlf(self.crlf)
            .unicode(self.unicode)
            .utf8(true)
    }
}

/// A pattern that is used to match the input.
/// The pattern is represented by a compiled regular expression and a token kind.
/// The token kind is the identity of the pattern within a [crate::PatternTable].
///
/// A pattern is immutable once it has been compiled. Cloning is cheap because the compiled
/// matcher is shared.
#[derive(Debug, Clone)]
pub struct Pattern<K> {
    kind: K,
    pattern: String,
    options: PatternOptions,
    regex: Regex,
}

impl<K: TokenKind> Pattern<K> {
    /// Create a new pattern with default options.
    ///
    /// # Errors
    /// An error is returned if the pattern text is not a valid regular expression or can't be
    /// compiled.
    pub fn new(kind: K, pattern: &str) -> Result<Self> {
        Self::with_options(kind, pattern, PatternOptions::default())
    }

    /// Create a new pattern with the given options.
    ///
    /// # Errors
    /// An error is returned if the pattern text is not a valid regular expression or can't be
    /// compiled.
    pub fn with_options(kind: K, pattern: &str, options: PatternOptions) -> Result<Self> {
        parse_regex_syntax(pattern, &options)?;
        let regex = Regex::builder()
            .syntax(options.syntax_config())
            .build(pattern)
            .map_err(|e| {
                PatlexError::new(PatlexErrorKind::PatternBuildError(
                    Box::new(e),
                    pattern.to_string(),
                ))
            })?;
        trace!("Compiled pattern {:?} for {:?}", pattern, kind);
        Ok(Self {
            kind,
            pattern: pattern.to_string(),
            options,
            regex,
        })
    }

    /// Get the token kind.
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Get the pattern text.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Get the options the pattern was compiled with.
    #[inline]
    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    /// Tries to match the pattern exactly at the given byte offset.
    ///
    /// Returns the length of the match in bytes. Empty matches and matches that don't start at
    /// `offset` are rejected. Look-around assertions like `^` or `\b` see the whole text.
    pub fn matches_at(&self, text: &str, offset: usize) -> Option<usize> {
        if offset > text.len() {
            return None;
        }
        let input = Input::new(text).range(offset..).anchored(Anchored::Yes);
        let matched = self.regex.find(input)?;
        if matched.start() != offset || matched.is_empty() {
            return None;
        }
        Some(matched.len())
    }
}

impl<K> std::fmt::Display for Pattern<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern.escape_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_at() {
        let pattern = Pattern::new(0usize, r"\d+").unwrap();
        assert_eq!(pattern.matches_at("ab123", 2), Some(3));
        assert_eq!(pattern.matches_at("ab123", 3), Some(2));
        // No skipping ahead.
        assert_eq!(pattern.matches_at("ab123", 0), None);
        assert_eq!(pattern.matches_at("ab123", 5), None);
        assert_eq!(pattern.matches_at("ab123", 6), None);
    }

    #[test]
    fn test_empty_match_is_rejected() {
        let pattern = Pattern::new(0usize, r"\d*").unwrap();
        assert_eq!(pattern.matches_at("abc", 0), None);
        assert_eq!(pattern.matches_at("1bc", 0), Some(1));
    }

    #[test]
    fn test_look_around_sees_whole_text() {
        let pattern = Pattern::new(0usize, r"^a").unwrap();
        assert_eq!(pattern.matches_at("aa", 0), Some(1));
        assert_eq!(pattern.matches_at("aa", 1), None);
        let pattern = Pattern::new(0usize, r"\bb").unwrap();
        assert_eq!(pattern.matches_at("ab", 1), None);
        assert_eq!(pattern.matches_at("a b", 2), Some(1));
    }

    #[test]
    fn test_options() {
        let options = PatternOptions::new().with_case_insensitive(true);
        let pattern = Pattern::with_options(0usize, "null", options).unwrap();
        assert_eq!(pattern.matches_at("NULL", 0), Some(4));
        assert!(pattern.options().case_insensitive);

        let options = PatternOptions::new().with_ignore_whitespace(true);
        let pattern = Pattern::with_options(0usize, r"\d+ \. \d+  # decimal", options).unwrap();
        assert_eq!(pattern.matches_at("3.14", 0), Some(4));
    }

    #[test]
    fn test_invalid_pattern() {
        let error = Pattern::new(0usize, r"[a-").unwrap_err();
        assert!(matches!(
            error.kind(),
            PatlexErrorKind::RegexSyntaxError(_, pattern) if pattern == "[a-"
        ));
    }

    #[test]
    fn test_pattern_build_error() {
        // Valid syntax, but the pattern can match invalid UTF-8.
        let error = Pattern::new(0usize, r"(?-u:\xFF)").unwrap_err();
        assert!(matches!(
            error.kind(),
            PatlexErrorKind::PatternBuildError(_, pattern) if pattern == r"(?-u:\xFF)"
        ));
        assert!(error.parse_failure().is_none());
    }

    #[test]
    fn test_display() {
        let pattern = Pattern::new(0usize, "\r?\n").unwrap();
        assert_eq!(pattern.to_string(), r"\r?\n");
        assert_eq!(pattern.pattern(), "\r?\n");
    }
}
