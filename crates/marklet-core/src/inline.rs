//! Delimiter matching for `_emphasis_` and `__strong__`.
//!
//! Both constructs follow one protocol and differ only in marker width and
//! in what they may contain:
//!
//! - an opening marker needs a valid boundary token right after it
//! - a closing marker needs a valid boundary token right before it
//! - a marker glued to a preceding word (mid-word) may not span whitespace
//!
//! A valid boundary is anything except a space run, a newline, or text that
//! starts with an ASCII digit (`_12_3` stays literal, `_½x_` is emphasis).
//!
//! Strong may contain emphasis. Emphasis flattens strong: `__` markers
//! inside emphasis vanish while the text around them is kept. When any rule
//! fails, the whole span read so far becomes one literal text node rebuilt
//! from the original token values, and parsing resumes right after it.

use crate::ast::{Emphasis, Node, Strong};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::parser::{vanished_marker, Context, TokenParser, MAX_NESTING};

/// The two delimited inline constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Emphasis,
    Strong,
}

impl Delimiter {
    #[inline]
    fn token_kind(self) -> TokenKind {
        match self {
            Delimiter::Emphasis => TokenKind::Emphasis,
            Delimiter::Strong => TokenKind::Strong,
        }
    }

    #[inline]
    fn name(self) -> &'static str {
        match self {
            Delimiter::Emphasis => "emphasis",
            Delimiter::Strong => "strong",
        }
    }
}

/// Whether a token next to a marker lets it act as a delimiter.
#[inline]
pub fn is_valid_boundary(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Space | TokenKind::NextLine => false,
        TokenKind::Text => !token.value.starts_with(|c: char| c.is_ascii_digit()),
        _ => true,
    }
}

impl<'t, 'a> TokenParser<'t, 'a> {
    /// Parse `_..._` starting at the marker under the cursor.
    pub(crate) fn parse_emphasis(&mut self) -> Node<'a> {
        let start = self.pos;
        let Some(mid_word) = self.open(Delimiter::Emphasis) else {
            return self.literal(start);
        };

        let tokens = self.tokens;
        let mut content = Vec::with_capacity(4);
        self.depth += 1;
        while let Some(token) = tokens.get(self.pos) {
            match token.kind {
                TokenKind::Emphasis => break,
                TokenKind::Strong => {
                    self.pos += 1;
                    content.push(vanished_marker(token));
                }
                _ => content.push(self.parse_node(Context::Emphasis)),
            }
        }
        self.depth -= 1;

        if !self.close(Delimiter::Emphasis, start, mid_word) {
            return self.literal(start);
        }
        Node::Emphasis(Emphasis {
            content,
            span: self.span_from(start),
        })
    }

    /// Parse `__...__` starting at the marker under the cursor.
    pub(crate) fn parse_strong(&mut self, context: Context) -> Node<'a> {
        let start = self.pos;
        let Some(mid_word) = self.open(Delimiter::Strong) else {
            return self.literal(start);
        };

        let tokens = self.tokens;
        let inner = context.nested();
        let mut content = Vec::with_capacity(4);
        self.depth += 1;
        while let Some(token) = tokens.get(self.pos) {
            match token.kind {
                TokenKind::Strong => break,
                TokenKind::Emphasis => content.push(self.parse_emphasis()),
                _ => content.push(self.parse_node(inner)),
            }
        }
        self.depth -= 1;

        if !self.close(Delimiter::Strong, start, mid_word) {
            return self.literal(start);
        }
        Node::Strong(Strong {
            content,
            span: self.span_from(start),
        })
    }

    /// Consume the opening marker.
    ///
    /// Returns whether the marker sits mid-word, or `None` when it cannot
    /// open and must be rendered on its own.
    fn open(&mut self, delimiter: Delimiter) -> Option<bool> {
        let start = self.pos;
        let span = self.tokens[start].span;
        self.pos += 1;

        let opens = self.tokens.get(start + 1).is_some_and(is_valid_boundary);
        if !opens {
            self.record(ParseError::invalid_opening(delimiter.name(), span));
            return None;
        }
        if self.depth >= MAX_NESTING {
            self.record(ParseError::nesting_too_deep(delimiter.name(), span));
            return None;
        }

        let mid_word = start > 0 && self.tokens[start - 1].kind == TokenKind::Text;
        Some(mid_word)
    }

    /// Check the closing marker under the cursor and consume it if the
    /// construct is accepted. On `false` the cursor is left on the marker.
    fn close(&mut self, delimiter: Delimiter, start: usize, mid_word: bool) -> bool {
        let error = if self.peek_kind(self.pos) != Some(delimiter.token_kind()) {
            ParseError::unclosed_delimiter(delimiter.name(), self.span_from(start))
        } else if !is_valid_boundary(&self.tokens[self.pos - 1]) {
            ParseError::invalid_closing(delimiter.name(), self.tokens[self.pos].span)
        } else if mid_word && self.tokens[start + 1..self.pos].iter().any(Token::is_whitespace) {
            ParseError::mid_word_whitespace(delimiter.name(), self.span_from(start))
        } else {
            self.pos += 1;
            return true;
        };

        self.record(error);
        false
    }
}
