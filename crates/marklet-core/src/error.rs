use crate::span::Span;
use std::fmt;

/// Why a construct fell back to literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Emphasis or strong without a closing marker.
    UnclosedDelimiter,
    /// Opening marker followed by whitespace, a digit or end of input.
    InvalidOpening,
    /// Closing marker preceded by whitespace or a digit.
    InvalidClosing,
    /// Delimiter glued to a word, but its content spans whitespace.
    MidWordWhitespace,
    /// Header or list marker not followed by exactly one space.
    MissingSpace,
    /// Delimiters nested deeper than the parser follows.
    NestingTooDeep,
}

impl ParseErrorKind {
    /// Stable snake_case name, used by tooling output.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParseErrorKind::UnclosedDelimiter => "unclosed_delimiter",
            ParseErrorKind::InvalidOpening => "invalid_opening",
            ParseErrorKind::InvalidClosing => "invalid_closing",
            ParseErrorKind::MidWordWhitespace => "mid_word_whitespace",
            ParseErrorKind::MissingSpace => "missing_space",
            ParseErrorKind::NestingTooDeep => "nesting_too_deep",
        }
    }
}

/// A construct that was recognized as syntax but rendered as its own text.
///
/// These never abort parsing; they describe how the tree degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source bytes that were emitted literally
    pub span: Span,
    /// Error categorization
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
        }
    }

    /// Create an error for a delimiter that never closed.
    pub fn unclosed_delimiter(delimiter: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnclosedDelimiter,
            format!("unclosed {}", delimiter),
            span,
        )
    }

    /// Create an error for a marker that cannot open a span.
    pub fn invalid_opening(delimiter: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::InvalidOpening,
            format!("{} cannot open here", delimiter),
            span,
        )
    }

    /// Create an error for a marker that cannot close a span.
    pub fn invalid_closing(delimiter: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::InvalidClosing,
            format!("{} cannot close here", delimiter),
            span,
        )
    }

    /// Create an error for mid-word delimiters around whitespace.
    pub fn mid_word_whitespace(delimiter: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::MidWordWhitespace,
            format!("mid-word {} spans whitespace", delimiter),
            span,
        )
    }

    /// Create an error for a line marker without its single space.
    pub fn missing_space(marker: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::MissingSpace,
            format!("{} marker must be followed by a single space", marker),
            span,
        )
    }

    /// Create an error for markers past the nesting limit.
    pub fn nesting_too_deep(marker: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::NestingTooDeep,
            format!("{} nested too deeply", marker),
            span,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at bytes {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}

/// A collection of parse errors encountered during parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Create an empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Check if any errors were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    /// Count errors of one kind.
    pub fn count(&self, kind: ParseErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
