/// Module that provides the table of line start offsets.
mod line_table;
pub(crate) use line_table::LineTable;

/// Module that provides the per-session match context.
pub(crate) mod match_context;
pub(crate) use match_context::MatchContext;

/// Module with the matching algorithm shared by the tokenizer and the stepping cursor.
pub(crate) mod match_engine;
pub(crate) use match_engine::{find_match, try_match};

/// The parser module contains the regex syntax check.
mod parser;
pub(crate) use parser::parse_regex_syntax;
