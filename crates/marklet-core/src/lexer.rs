//! Single-pass tokenizer with SIMD-accelerated text scanning.
//!
//! The lexer turns markdown into a flat sequence of typed tokens for the
//! parser. Escapes are resolved here, so the parser never sees a backslash
//! that was used as an escape.
//!
//! # Performance
//!
//! - One left-to-right scan, no backtracking
//! - Plain text runs are skipped with `memchr` (SIMD on supported platforms)
//! - Token values borrow from the input unless an escape had to be resolved

use std::borrow::Cow;

use memchr::memchr3;

use crate::ast::CowStr;
use crate::span::Span;

/// Characters that may follow `\` to be taken literally.
pub const ESCAPABLE: &[u8] = b"_\\ #-";

const ESCAPE: u8 = b'\\';
const UNDERSCORE: u8 = b'_';
const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';
const HASH: u8 = b'#';
const DASH: u8 = b'-';

/// Token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Run of ordinary characters (escapes already resolved).
    Text,
    /// Run of one or more spaces.
    Space,
    /// A single `\n`.
    NextLine,
    /// `#` at line start followed by a space.
    Header,
    /// `-` at line start followed by a space.
    ListItem,
    /// A lone `_`.
    Emphasis,
    /// Exactly `__`.
    Strong,
}

impl TokenKind {
    /// Stable lowercase name, used by tooling output.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Text => "text",
            TokenKind::Space => "space",
            TokenKind::NextLine => "next_line",
            TokenKind::Header => "header",
            TokenKind::ListItem => "list_item",
            TokenKind::Emphasis => "emphasis",
            TokenKind::Strong => "strong",
        }
    }
}

/// A lexed token: its kind, the text it stands for, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token category.
    pub kind: TokenKind,
    /// Literal text represented by the token.
    pub value: CowStr<'a>,
    /// Byte span in the original input.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Create a token.
    #[inline]
    pub fn new(kind: TokenKind, value: impl Into<CowStr<'a>>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Whether this token is a space run or a newline.
    #[inline(always)]
    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Space | TokenKind::NextLine)
    }
}

/// Tokenize markdown input.
///
/// # Example
///
/// ```rust
/// use marklet_core::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("# _hi_");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Header,
///         TokenKind::Space,
///         TokenKind::Emphasis,
///         TokenKind::Text,
///         TokenKind::Emphasis,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).tokenize()
}

/// Streaming state for one tokenize call.
pub struct Lexer<'a> {
    /// The complete input text.
    input: &'a str,
    /// Input as bytes for efficient scanning.
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Start of the pending text run, if any.
    text_start: Option<usize>,
    /// Owned copy of the pending run once an escape was resolved in it.
    unescaped: Option<String>,
    /// Next `_`, space or newline at or after `offset`; `None` until scanned.
    common_at: Option<usize>,
    /// Next `\`, `#` or `-` at or after `offset`; `None` until scanned.
    rare_at: Option<usize>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            text_start: None,
            unescaped: None,
            common_at: None,
            rare_at: None,
            tokens: Vec::with_capacity(input.len() / 4 + 1),
        }
    }

    /// Consume the lexer and produce the full token sequence.
    pub fn tokenize(mut self) -> Vec<Token<'a>> {
        while self.offset < self.bytes.len() {
            let next_special = self.find_next_special();
            if next_special > self.offset {
                self.extend_text(next_special);
            }
            if next_special >= self.bytes.len() {
                break;
            }

            match self.bytes[next_special] {
                ESCAPE => self.lex_escape(),
                UNDERSCORE => self.lex_underscores(),
                SPACE => self.lex_spaces(),
                NEWLINE => self.lex_newline(),
                HASH => self.lex_line_marker(TokenKind::Header),
                DASH => self.lex_line_marker(TokenKind::ListItem),
                _ => self.extend_text(next_special + 1),
            }
        }

        self.flush_text();
        self.tokens
    }

    /// Position of the next special byte, or the input length.
    ///
    /// Each byte class keeps its last hit and is rescanned only once the
    /// cursor has moved past it, so every byte is scanned at most once per
    /// class.
    #[inline(always)]
    fn find_next_special(&mut self) -> usize {
        let bytes = self.bytes;
        let offset = self.offset;

        if self.common_at.map_or(true, |at| at < offset) {
            let hit = memchr3(UNDERSCORE, SPACE, NEWLINE, &bytes[offset..]);
            self.common_at = Some(hit.map_or(bytes.len(), |i| offset + i));
        }
        if self.rare_at.map_or(true, |at| at < offset) {
            let hit = memchr3(ESCAPE, HASH, DASH, &bytes[offset..]);
            self.rare_at = Some(hit.map_or(bytes.len(), |i| offset + i));
        }

        let common = self.common_at.unwrap_or(bytes.len());
        let rare = self.rare_at.unwrap_or(bytes.len());
        common.min(rare)
    }

    /// Append `self.offset..end` of the input to the pending text run.
    #[inline(always)]
    fn extend_text(&mut self, end: usize) {
        if self.text_start.is_none() {
            self.text_start = Some(self.offset);
        }
        if let Some(buf) = self.unescaped.as_mut() {
            buf.push_str(&self.input[self.offset..end]);
        }
        self.offset = end;
    }

    fn flush_text(&mut self) {
        let Some(start) = self.text_start.take() else {
            return;
        };
        let input = self.input;
        let value = match self.unescaped.take() {
            Some(buf) => Cow::Owned(buf),
            None => Cow::Borrowed(&input[start..self.offset]),
        };
        self.tokens.push(Token::new(
            TokenKind::Text,
            value,
            Span::from_range(start, self.offset),
        ));
    }

    #[inline]
    fn push_marker(&mut self, kind: TokenKind, end: usize) {
        self.flush_text();
        let input = self.input;
        let start = self.offset;
        self.tokens.push(Token::new(
            kind,
            &input[start..end],
            Span::from_range(start, end),
        ));
        self.offset = end;
    }

    fn lex_escape(&mut self) {
        let escaped = match self.bytes.get(self.offset + 1) {
            Some(&b) if ESCAPABLE.contains(&b) => b,
            _ => {
                // Lone backslash stays literal.
                self.extend_text(self.offset + 1);
                return;
            }
        };

        let input = self.input;
        let offset = self.offset;
        let start = *self.text_start.get_or_insert(offset);
        self.unescaped
            .get_or_insert_with(|| input[start..offset].to_string())
            .push(escaped as char);
        self.offset += 2;
    }

    fn lex_underscores(&mut self) {
        let end = self.run_end(UNDERSCORE);
        let kind = match end - self.offset {
            1 => TokenKind::Emphasis,
            2 => TokenKind::Strong,
            _ => TokenKind::Text,
        };
        self.push_marker(kind, end);
    }

    fn lex_spaces(&mut self) {
        let end = self.run_end(SPACE);
        self.push_marker(TokenKind::Space, end);
    }

    fn lex_newline(&mut self) {
        self.push_marker(TokenKind::NextLine, self.offset + 1);
    }

    /// `#` and `-` only act as markers at line start with a space after.
    fn lex_line_marker(&mut self, marker: TokenKind) {
        let at_line_start = self.offset == 0 || self.bytes[self.offset - 1] == NEWLINE;
        let space_after = self.bytes.get(self.offset + 1) == Some(&SPACE);
        let kind = if at_line_start && space_after {
            marker
        } else {
            TokenKind::Text
        };
        self.push_marker(kind, self.offset + 1);
    }

    #[inline(always)]
    fn run_end(&self, byte: u8) -> usize {
        self.offset
            + self.bytes[self.offset..]
                .iter()
                .take_while(|&&b| b == byte)
                .count()
    }
}
