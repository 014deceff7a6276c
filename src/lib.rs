#![forbid(missing_docs)]
//! # `patlex`
//! The `patlex` crate is a small, pattern driven tokenizer.
//! You register an ordered list of regular expressions, each one bound to a token kind, and the
//! tokenizer splits an input text into positioned tokens.
//!
//! At every position of the input the patterns are tried in registration order. The first pattern
//! that matches a non-empty text starting exactly at this position wins, even if a later pattern
//! would match a longer text. If no pattern matches, tokenization fails with a
//! [ParseFailure] that carries the line and column of the offending position.
//!
//! The crate provides two ways to tokenize:
//! - [Tokenizer::tokenize] consumes the whole input at once and returns a [TokenSequence].
//!   Optional hooks are called before and after each token is inserted. The pre-insertion hook can
//!   edit the token text or cancel the insertion, e.g. to drop whitespace.
//! - [Tokenizer::create_stepping_cursor] returns a [SteppingCursor] that produces one token at a
//!   time, can restrict the next token to a certain kind, can peek, and can step back.
//!
//! To parse the given regular expressions, the crate uses the `regex-syntax` crate, matching is
//! done with the `regex-automata` crate.
//!
//! Offsets are byte offsets into the input. Line numbers are 1-based, columns are 0-based byte
//! offsets within the line.
//!
//! # Example
//! ```rust
//! use patlex::TokenizerBuilder;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Comma,
//!     Number,
//!     String,
//!     NewLine,
//! }
//!
//! let tokenizer = TokenizerBuilder::new()
//!     .add_pattern(Kind::Comma, r",")
//!     .add_pattern(Kind::Number, r"\d+")
//!     .add_pattern(Kind::String, r#""[^"]*""#)
//!     .add_pattern(Kind::NewLine, r"\r?\n")
//!     .build()
//!     .expect("TokenizerBuilder error");
//!
//! let tokens = tokenizer.tokenize("12,\"ab\"\n").expect("Tokenize error");
//! for token in &tokens {
//!     println!("{}", token);
//! }
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[2].kind(), Kind::String);
//! assert_eq!((tokens[3].line_number(), tokens[3].line_index()), (1, 7));
//! ```
//! The output of the example is:
//! ```text
//! Number: '12' (1:0)
//! Comma: ',' (1:2)
//! String: '\"ab\"' (1:3)
//! NewLine: '\n' (1:7)
//! ```
//!
//! # Concurrency
//! A [Tokenizer] can be shared between threads. Every tokenize call and every stepping cursor
//! works on its own [PatternSnapshot], so changing the patterns of a tokenizer never affects a
//! running session.
//!
//! # Crate features
//! - `serde`: enabled by default. Derives `Serialize` and `Deserialize` for [Position],
//!   [PatternOptions], [Token] and [TokenMatch].

/// Module with error definitions
mod errors;
pub use errors::{ParseFailure, PatlexError, PatlexErrorKind, Result};

/// The module with internal implementation details.
mod internal;

/// Module that provides the Pattern type and its options
mod pattern;
pub use pattern::{Pattern, PatternOptions};

/// Module that provides the PatternTable type
mod pattern_table;
pub use pattern_table::{PatternSnapshot, PatternTable};

/// Module that provides a position type
mod position;
pub use position::{Position, PositionProvider};

/// The module with the stepping cursor.
mod stepping_cursor;
pub use stepping_cursor::SteppingCursor;

/// Module that provides the Token type
mod token;
pub use token::{Token, TokenKind};

/// Module that provides the TokenKindGroup type
mod token_kind_group;
pub use token_kind_group::TokenKindGroup;

/// Module that provides the TokenMatch type
mod token_match;
pub use token_match::TokenMatch;

/// Module that provides the TokenSequence type
mod token_sequence;
pub use token_sequence::{SequenceId, TokenSequence};

/// The module with the tokenizer.
mod tokenizer;
pub use tokenizer::{PostInsertHook, PreInsertHook, Tokenizer};

/// The module with the tokenizer builder.
mod tokenizer_builder;
pub use tokenizer_builder::TokenizerBuilder;
