use std::{sync::Arc, time::Instant};

use log::{debug, trace};

use crate::{
    internal::{try_match, MatchContext},
    Pattern, PatternOptions, PatternTable, Result, SteppingCursor, Token, TokenKind, TokenMatch,
    TokenSequence,
};

/// A hook that is called with every match before it is added to the token sequence.
/// It can edit the text of the match and cancel its insertion.
pub type PreInsertHook<K> = Arc<dyn Fn(&mut TokenMatch<K>) + Send + Sync>;

/// A hook that is called after a token was added to the token sequence.
/// It receives the sequence and the token just added, which is the last one of the sequence.
pub type PostInsertHook<K> = Arc<dyn Fn(&TokenSequence<K>, &Token<K>) + Send + Sync>;

/// A tokenizer.
///
/// It holds an ordered table of patterns and optional hooks. At every position of the input the
/// patterns are tried in registration order and the first one that matches a non-empty text
/// starting exactly at this position produces the next token.
///
/// Every call of [Tokenizer::tokenize] and [Tokenizer::create_stepping_cursor] works on its own
/// snapshot of the patterns, so a tokenizer can be shared between threads and used concurrently.
/// Changing the patterns requires exclusive access.
///
/// To create a tokenizer with a fluent interface you can use the [crate::TokenizerBuilder].
pub struct Tokenizer<K> {
    pub(crate) patterns: PatternTable<K>,
    pub(crate) pre_insert: Option<PreInsertHook<K>>,
    pub(crate) post_insert: Option<PostInsertHook<K>>,
    pub(crate) yield_every: usize,
}

impl<K> Default for Tokenizer<K> {
    fn default() -> Self {
        Self {
            patterns: PatternTable::default(),
            pre_insert: None,
            post_insert: None,
            yield_every: 0,
        }
    }
}

impl<K: TokenKind> Tokenizer<K> {
    /// Creates a tokenizer without patterns and hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern. See [PatternTable::add].
    pub fn add_pattern(&mut self, kind: K, pattern: &str) -> Result<Option<&Pattern<K>>> {
        self.patterns.add(kind, pattern)
    }

    /// Adds a pattern with options. See [PatternTable::add_with_options].
    pub fn add_pattern_with_options(
        &mut self,
        kind: K,
        pattern: &str,
        options: PatternOptions,
    ) -> Result<Option<&Pattern<K>>> {
        self.patterns.add_with_options(kind, pattern, options)
    }

    /// Removes the pattern of the given kind.
    pub fn remove_pattern(&mut self, kind: K) -> Option<Pattern<K>> {
        self.patterns.remove(kind)
    }

    /// Checks if a pattern of the given kind is registered.
    pub fn has_pattern_kind(&self, kind: K) -> bool {
        self.patterns.has(kind)
    }

    /// Get the pattern table.
    #[inline]
    pub fn patterns(&self) -> &PatternTable<K> {
        &self.patterns
    }

    /// Sets the hook that is called before a match is added to the token sequence.
    /// To use several observers compose them into one function.
    pub fn set_pre_insert_hook<F>(&mut self, hook: F)
    where
        F: Fn(&mut TokenMatch<K>) + Send + Sync + 'static,
    {
        self.pre_insert = Some(Arc::new(hook));
    }

    /// Sets the hook that is called after a token was added to the token sequence.
    pub fn set_post_insert_hook<F>(&mut self, hook: F)
    where
        F: Fn(&TokenSequence<K>, &Token<K>) + Send + Sync + 'static,
    {
        self.post_insert = Some(Arc::new(hook));
    }

    /// Removes both hooks.
    pub fn clear_hooks(&mut self) {
        self.pre_insert = None;
        self.post_insert = None;
    }

    /// Lets the tokenizer yield the current thread after every `n` tokens.
    /// A value of 0 disables yielding.
    pub fn set_yield_every(&mut self, n: usize) {
        self.yield_every = n;
    }

    /// Get the number of tokens after which the tokenizer yields, 0 if it never yields.
    #[inline]
    pub fn yield_every(&self) -> usize {
        self.yield_every
    }

    /// Tokenizes the complete text.
    ///
    /// An empty text results in an empty sequence.
    ///
    /// # Errors
    /// If no pattern matches at some position an error with a [crate::ParseFailure] is returned.
    /// No partial result is returned in this case.
    pub fn tokenize(&self, text: &str) -> Result<TokenSequence<K>> {
        let mut tokens = TokenSequence::new();
        if text.is_empty() {
            return Ok(tokens);
        }
        let now = Instant::now();
        let mut context = MatchContext::new(text, self.patterns.snapshot());
        let mut matched_count = 0;

        while context.has_next() {
            let Some(mut token_match) = try_match(&context, None) else {
                let failure = context.parse_failure();
                debug!(
                    "Tokenize failed at {}: {:?}",
                    context.position(),
                    failure.line_text
                );
                return Err(failure.into());
            };
            context.advance_by(token_match.len());

            if let Some(hook) = &self.pre_insert {
                hook(&mut token_match);
            }
            if token_match.is_cancelled() {
                trace!("Insertion cancelled: {:?}", token_match);
            } else {
                tokens.push_match(token_match);
                if let (Some(hook), Some(token)) = (&self.post_insert, tokens.last()) {
                    hook(&tokens, token);
                }
            }

            matched_count += 1;
            if self.yield_every > 0 && matched_count % self.yield_every == 0 {
                std::thread::yield_now();
            }
        }

        debug!(
            "Tokenized {} bytes into {} tokens ({} matches) in {} microseconds",
            text.len(),
            tokens.len(),
            matched_count,
            now.elapsed().as_micros()
        );
        Ok(tokens)
    }

    /// Creates a stepping cursor over the given text.
    ///
    /// The cursor works on a snapshot of the current patterns. Later changes of this tokenizer
    /// don't affect it. Hooks are not applied by the cursor.
    pub fn create_stepping_cursor<'h>(&self, text: &'h str) -> SteppingCursor<'h, K> {
        SteppingCursor::new(MatchContext::new(text, self.patterns.snapshot()))
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for Tokenizer<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("patterns", &self.patterns)
            .field("pre_insert", &self.pre_insert.is_some())
            .field("post_insert", &self.post_insert.is_some())
            .field("yield_every", &self.yield_every)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use super::*;
    use crate::PatlexErrorKind;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Comma,
        Number,
        String,
        NewLine,
        Space,
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn csv_tokenizer() -> Tokenizer<Kind> {
        let mut tokenizer = Tokenizer::new();
        tokenizer.add_pattern(Kind::Comma, ",").unwrap();
        tokenizer.add_pattern(Kind::Number, r"\d+").unwrap();
        tokenizer.add_pattern(Kind::String, r#""[^"]*""#).unwrap();
        tokenizer.add_pattern(Kind::NewLine, r"\r?\n").unwrap();
        tokenizer
    }

    #[test]
    fn test_tokenize() {
        init();
        let tokens = csv_tokenizer().tokenize("12,\"ab\"\n").unwrap();
        assert_eq!(
            tokens
                .iter()
                .map(|t| (t.kind(), t.text(), t.line_number(), t.line_index()))
                .collect::<Vec<_>>(),
            vec![
                (Kind::Number, "12", 1, 0),
                (Kind::Comma, ",", 1, 2),
                (Kind::String, "\"ab\"", 1, 3),
                (Kind::NewLine, "\n", 1, 7),
            ]
        );
        assert!(tokens.iter().all(|t| t.is_owned_by(&tokens)));
    }

    #[test]
    fn test_empty_input() {
        init();
        let tokens = csv_tokenizer().tokenize("").unwrap();
        assert!(tokens.is_empty());
        let tokens = Tokenizer::<Kind>::new().tokenize("").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_parse_failure() {
        init();
        let mut tokenizer = Tokenizer::new();
        tokenizer.add_pattern(Kind::Number, r"\d+").unwrap();
        let error = tokenizer.tokenize("1@2").unwrap_err();
        let failure = error.parse_failure().unwrap();
        assert_eq!(failure.index, 1);
        assert_eq!(failure.line_number, 1);
        assert_eq!(failure.line_index, 1);
        assert_eq!(failure.line_text, "1@2");
        assert!(matches!(error.kind(), PatlexErrorKind::ParseFailure(_)));
    }

    #[test]
    fn test_no_patterns() {
        init();
        let error = Tokenizer::<Kind>::new().tokenize("x").unwrap_err();
        let failure = error.parse_failure().unwrap();
        assert_eq!((failure.index, failure.line_number, failure.line_index), (0, 1, 0));
    }

    #[test]
    fn test_pre_insert_hook_edits_and_cancels() {
        init();
        let mut tokenizer = csv_tokenizer();
        tokenizer.add_pattern(Kind::Space, r"[ \t]+").unwrap();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_hook = Arc::clone(&seen);
        tokenizer.set_pre_insert_hook(move |token_match| {
            seen_in_hook.fetch_add(1, Ordering::SeqCst);
            match token_match.kind() {
                Kind::Space => token_match.cancel(),
                Kind::String => {
                    let unquoted = token_match.raw_text().trim_matches('"').to_string();
                    token_match.set_text(unquoted);
                }
                _ => {}
            }
        });
        let tokens = tokenizer.tokenize("1, \"x y\"").unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 4);
        assert_eq!(tokens.len(), 3);
        let string = &tokens[2];
        assert_eq!(string.text(), "x y");
        assert_eq!(string.raw_text(), "\"x y\"");
        assert_eq!(string.index(), 3);
        assert_eq!(string.range(), 3..8);
    }

    #[test]
    fn test_post_insert_hook() {
        init();
        let mut tokenizer = csv_tokenizer();
        let observed = Arc::new(Mutex::new(Vec::new()));
        let observed_in_hook = Arc::clone(&observed);
        tokenizer.set_post_insert_hook(move |tokens, token| {
            assert!(tokens.is_last(token));
            observed_in_hook
                .lock()
                .unwrap()
                .push((tokens.len(), token.kind()));
        });
        tokenizer.tokenize("1,2").unwrap();
        assert_eq!(
            *observed.lock().unwrap(),
            vec![(1, Kind::Number), (2, Kind::Comma), (3, Kind::Number)]
        );
        tokenizer.clear_hooks();
        tokenizer.tokenize("3").unwrap();
        assert_eq!(observed.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_yield_every() {
        init();
        let mut tokenizer = csv_tokenizer();
        tokenizer.set_yield_every(2);
        assert_eq!(tokenizer.yield_every(), 2);
        let tokens = tokenizer.tokenize("1,2,3,4,5").unwrap();
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_pattern_registration() {
        init();
        let mut tokenizer = csv_tokenizer();
        assert!(tokenizer.has_pattern_kind(Kind::Comma));
        assert!(tokenizer.add_pattern(Kind::Comma, ";").unwrap().is_none());
        assert!(tokenizer.remove_pattern(Kind::Comma).is_some());
        assert!(!tokenizer.has_pattern_kind(Kind::Comma));
        assert!(tokenizer.tokenize("1,2").is_err());
        assert_eq!(tokenizer.patterns().len(), 3);
        assert!(format!("{:?}", tokenizer).starts_with("Tokenizer"));
    }
}
