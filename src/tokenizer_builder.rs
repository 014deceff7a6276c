use std::sync::Arc;

use crate::{
    PatternOptions, PatternTable, PostInsertHook, PreInsertHook, Result, Token, TokenKind,
    TokenMatch, TokenSequence, Tokenizer,
};

/// A builder for creating a tokenizer.
///
/// Patterns are compiled when [TokenizerBuilder::build] is called. Like with
/// [PatternTable::add], empty patterns and patterns for an already registered kind are skipped.
pub struct TokenizerBuilder<K> {
    patterns: Vec<(K, String, PatternOptions)>,
    pre_insert: Option<PreInsertHook<K>>,
    post_insert: Option<PostInsertHook<K>>,
    yield_every: usize,
}

impl<K> Default for TokenizerBuilder<K> {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            pre_insert: None,
            post_insert: None,
            yield_every: 0,
        }
    }
}

impl<K: TokenKind> TokenizerBuilder<K> {
    /// Creates a new tokenizer builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern with default options.
    pub fn add_pattern(self, kind: K, pattern: &str) -> Self {
        self.add_pattern_with_options(kind, pattern, PatternOptions::default())
    }

    /// Adds a pattern with the given options.
    pub fn add_pattern_with_options(
        mut self,
        kind: K,
        pattern: &str,
        options: PatternOptions,
    ) -> Self {
        self.patterns.push((kind, pattern.to_string(), options));
        self
    }

    /// Adds multiple patterns with default options.
    pub fn add_patterns<S: AsRef<str>>(mut self, patterns: &[(K, S)]) -> Self {
        self.patterns.extend(patterns.iter().map(|(kind, pattern)| {
            (
                *kind,
                pattern.as_ref().to_string(),
                PatternOptions::default(),
            )
        }));
        self
    }

    /// Sets the hook that is called before a match is added to the token sequence.
    pub fn pre_insert_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut TokenMatch<K>) + Send + Sync + 'static,
    {
        self.pre_insert = Some(Arc::new(hook));
        self
    }

    /// Sets the hook that is called after a token was added to the token sequence.
    pub fn post_insert_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TokenSequence<K>, &Token<K>) + Send + Sync + 'static,
    {
        self.post_insert = Some(Arc::new(hook));
        self
    }

    /// Lets the tokenizer yield the current thread after every `n` tokens, 0 disables it.
    pub fn yield_every(mut self, n: usize) -> Self {
        self.yield_every = n;
        self
    }

    /// Builds the tokenizer.
    ///
    /// # Errors
    /// An error is returned if one of the patterns can't be compiled.
    pub fn build(self) -> Result<Tokenizer<K>> {
        let mut patterns = PatternTable::new();
        for (kind, pattern, options) in &self.patterns {
            patterns.add_with_options(*kind, pattern, *options)?;
        }
        Ok(Tokenizer {
            patterns,
            pre_insert: self.pre_insert,
            post_insert: self.post_insert,
            yield_every: self.yield_every,
        })
    }
}
