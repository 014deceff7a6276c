use std::{ops::Deref, sync::Arc};

use log::debug;

use crate::{Pattern, PatternOptions, Result, TokenKind};

/// An ordered collection of patterns.
///
/// The order of registration is significant: patterns are tried in this order and the first one
/// that matches wins. At most one pattern per token kind can be registered.
///
/// Tokenization never reads the table directly. Each session works on a [PatternSnapshot] taken
/// when the session starts.
#[derive(Debug, Clone)]
pub struct PatternTable<K> {
    patterns: Vec<Pattern<K>>,
}

impl<K> Default for PatternTable<K> {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }
}

impl<K: TokenKind> PatternTable<K> {
    /// Creates an empty pattern table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern with default options.
    ///
    /// Returns `Ok(None)` without changing the table if the pattern text is empty or a pattern of
    /// the same kind is already registered.
    ///
    /// # Errors
    /// An error is returned if the pattern text can't be compiled.
    pub fn add(&mut self, kind: K, pattern: &str) -> Result<Option<&Pattern<K>>> {
        self.add_with_options(kind, pattern, PatternOptions::default())
    }

    /// Adds a pattern with the given options.
    ///
    /// Returns `Ok(None)` without changing the table if the pattern text is empty or a pattern of
    /// the same kind is already registered.
    ///
    /// # Errors
    /// An error is returned if the pattern text can't be compiled.
    pub fn add_with_options(
        &mut self,
        kind: K,
        pattern: &str,
        options: PatternOptions,
    ) -> Result<Option<&Pattern<K>>> {
        if pattern.is_empty() {
            debug!("Skipped empty pattern for {:?}", kind);
            return Ok(None);
        }
        if self.has(kind) {
            debug!("Skipped pattern {:?}, {:?} is already registered", pattern, kind);
            return Ok(None);
        }
        let compiled = Pattern::with_options(kind, pattern, options)?;
        debug!("Added pattern {:?} for {:?}", pattern, kind);
        self.patterns.push(compiled);
        Ok(self.patterns.last())
    }

    /// Removes the pattern of the given kind. Does nothing if there is none.
    pub fn remove(&mut self, kind: K) -> Option<Pattern<K>> {
        let position = self.patterns.iter().position(|p| p.kind() == kind)?;
        debug!("Removed pattern for {:?}", kind);
        Some(self.patterns.remove(position))
    }

    /// Checks if a pattern of the given kind is registered.
    pub fn has(&self, kind: K) -> bool {
        self.patterns.iter().any(|p| p.kind() == kind)
    }

    /// Returns the pattern of the given kind.
    pub fn get(&self, kind: K) -> Option<&Pattern<K>> {
        self.patterns.iter().find(|p| p.kind() == kind)
    }

    /// Returns the patterns in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern<K>> {
        self.patterns.iter()
    }

    /// The number of registered patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Checks if no pattern is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Removes all patterns.
    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    /// Copies the current patterns into an immutable snapshot.
    /// Later changes of the table don't affect the snapshot.
    pub fn snapshot(&self) -> PatternSnapshot<K> {
        PatternSnapshot {
            patterns: self.patterns.iter().cloned().collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a PatternTable<K> {
    type Item = &'a Pattern<K>;
    type IntoIter = std::slice::Iter<'a, Pattern<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

/// An immutable copy of the patterns of a [PatternTable] at a certain point in time.
///
/// Cloning a snapshot is cheap, clones share the same patterns.
#[derive(Debug, Clone)]
pub struct PatternSnapshot<K> {
    patterns: Arc<[Pattern<K>]>,
}

impl<K: TokenKind> PatternSnapshot<K> {
    /// Returns the token kinds of the snapshot in registration order.
    pub fn kinds(&self) -> Vec<K> {
        self.patterns.iter().map(|p| p.kind()).collect()
    }
}

impl<K> Deref for PatternSnapshot<K> {
    type Target = [Pattern<K>];

    fn deref(&self) -> &Self::Target {
        &self.patterns
    }
}
