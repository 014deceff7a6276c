use thiserror::Error;

/// The result type for the `patlex` crate.
pub type Result<T> = std::result::Result<T, PatlexError>;

/// The error type for the `patlex` crate.
#[derive(Error, Debug)]
pub struct PatlexError {
    /// The source of the error.
    pub source: Box<PatlexErrorKind>,
}

impl PatlexError {
    /// Create a new `PatlexError`.
    pub fn new(kind: PatlexErrorKind) -> Self {
        PatlexError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    #[inline]
    pub fn kind(&self) -> &PatlexErrorKind {
        &self.source
    }

    /// Returns the lexical error if this error was raised by a tokenize call.
    pub fn parse_failure(&self) -> Option<&ParseFailure> {
        match self.source.as_ref() {
            PatlexErrorKind::ParseFailure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl std::fmt::Display for PatlexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum PatlexErrorKind {
    /// The pattern text could not be parsed as a regular expression.
    /// The second field holds the offending pattern text.
    #[error("'{1}' {0}")]
    RegexSyntaxError(regex_syntax::ast::Error, String),

    /// The pattern text was parsed but could not be compiled into a matcher.
    /// The second field holds the offending pattern text.
    #[error("'{1}' {0}")]
    PatternBuildError(Box<regex_automata::meta::BuildError>, String),

    /// No pattern matched at some position of the input.
    #[error(transparent)]
    ParseFailure(ParseFailure),
}

impl From<ParseFailure> for PatlexError {
    fn from(failure: ParseFailure) -> Self {
        PatlexError::new(PatlexErrorKind::ParseFailure(failure))
    }
}

/// A lexical error.
///
/// It is raised when no registered pattern matches at the current position of the input and
/// carries enough context to render a caret style message without scanning the input again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseFailure {
    /// The complete input text.
    pub text: String,
    /// The text of the line the error occurred in, without its line terminator.
    pub line_text: String,
    /// The byte offset of the error in the input.
    pub index: usize,
    /// The 1-based line number of the error.
    pub line_number: usize,
    /// The 0-based byte offset of the error within its line.
    pub line_index: usize,
    /// The rendered error message.
    pub message: String,
}

impl ParseFailure {
    /// Create a new `ParseFailure`. The message is derived from the position and the line text.
    pub fn new(
        text: String,
        line_text: String,
        index: usize,
        line_number: usize,
        line_index: usize,
    ) -> Self {
        let message = format!(
            "Parse Error (Line:{}, Index:{})\n{}",
            line_number, line_index, line_text
        );
        Self {
            text,
            line_text,
            index,
            line_number,
            line_index,
            message,
        }
    }

    /// Renders the line of the error with a caret below the offending position.
    pub fn caret_line(&self) -> String {
        let prefix: String = self
            .line_text
            .get(..self.line_index)
            .unwrap_or_default()
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        format!("{}\n{}^", self.line_text, prefix)
    }
}
