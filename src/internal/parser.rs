//! This module contains the syntax check for pattern texts.
//! We use the `regex_syntax` crate to parse the pattern text into an abstract syntax tree (AST)
//! before it is compiled. This way malformed patterns are reported with the exact location of the
//! syntax error at registration time.

use crate::{PatlexError, PatlexErrorKind, PatternOptions, Result};
use log::trace;
use regex_syntax::ast::{parse::ParserBuilder, Ast};
use std::time::Instant;

/// Parse the pattern text into an abstract syntax tree.
/// # Arguments
/// * `input` - A string slice that holds the regex syntax.
/// * `options` - The options that influence parsing, currently only `ignore_whitespace`.
/// # Errors
/// An error is returned if the regex syntax is invalid.
pub(crate) fn parse_regex_syntax(input: &str, options: &PatternOptions) -> Result<Ast> {
    let now = Instant::now();
    let mut parser = ParserBuilder::new()
        .ignore_whitespace(options.ignore_whitespace)
        .build();
    match parser.parse(input) {
        Ok(ast) => {
            let elapsed_time = now.elapsed();
            trace!("Parsing took {} microseconds.", elapsed_time.as_micros());
            Ok(ast)
        }
        Err(e) => Err(PatlexError::new(PatlexErrorKind::RegexSyntaxError(
            e,
            input.to_string(),
        ))),
    }
}
