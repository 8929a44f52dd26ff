//! Single-pass recursive-descent parser over the token stream.
//!
//! One cursor walks the tokens left to right. Block constructs (headers and
//! lists) live here; delimiter matching for emphasis and strong lives in
//! [`crate::inline`]. Nothing is fatal: every malformed construct degrades
//! to literal text and is recorded as a recoverable [`ParseError`].

use std::borrow::Cow;

use crate::ast::{Document, Header, List, ListItem, Node, Text};
use crate::error::{ParseError, ParseErrors};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::span::Span;

/// Deepest chain of nested headers/emphasis/strong the parser follows.
pub(crate) const MAX_NESTING: usize = 64;

/// Result type for parsing that includes recovered errors.
#[derive(Debug)]
pub struct ParseResult<'a> {
    /// The parsed document.
    pub document: Document<'a>,
    /// Constructs that fell back to literal text.
    pub errors: ParseErrors,
}

impl<'a> ParseResult<'a> {
    /// Check if every construct parsed as written.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Markdown parser with error recovery.
#[derive(Debug, Default)]
pub struct Parser {
    /// Errors collected during the last parse.
    errors: ParseErrors,
}

impl Parser {
    /// Create a new parser.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and parse the input.
    ///
    /// Parsing never fails; see [`Parser::parse_with_recovery`] for the
    /// constructs that were rendered literally.
    #[inline]
    pub fn parse<'a>(&mut self, input: &'a str) -> Document<'a> {
        let tokens = tokenize(input);
        let mut document = self.parse_tokens(&tokens);
        document.span = Span::from_range(0, input.len());
        document
    }

    /// Parse with error recovery, returning both document and errors.
    #[inline]
    pub fn parse_with_recovery<'a>(&mut self, input: &'a str) -> ParseResult<'a> {
        let document = self.parse(input);
        ParseResult {
            document,
            errors: std::mem::take(&mut self.errors),
        }
    }

    /// Parse an already tokenized input.
    pub fn parse_tokens<'a>(&mut self, tokens: &[Token<'a>]) -> Document<'a> {
        self.errors = ParseErrors::new();

        let span = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::default(),
        };

        let mut cursor = TokenParser::new(tokens, &mut self.errors);
        let children = cursor.parse_document();

        Document { children, span }
    }

    /// Errors recorded by the last call to [`Parser::parse`] or
    /// [`Parser::parse_tokens`].
    pub fn errors(&self) -> &ParseErrors {
        &self.errors
    }
}

/// Where a token is being dispatched from.
///
/// Threaded through every recursive call instead of being stored on the
/// cursor, so each call depends only on the tokens, the position and this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    /// Document level; list markers start lists.
    Block,
    /// Header, list item or strong content.
    Inline,
    /// Inside emphasis, up to any nested header; strong markers vanish.
    Emphasis,
}

impl Context {
    /// Context for content nested one level deeper.
    #[inline]
    pub(crate) fn nested(self) -> Context {
        match self {
            Context::Block => Context::Inline,
            other => other,
        }
    }
}

/// Cursor over one token slice.
pub(crate) struct TokenParser<'t, 'a> {
    pub(crate) tokens: &'t [Token<'a>],
    pub(crate) pos: usize,
    pub(crate) depth: usize,
    errors: &'t mut ParseErrors,
}

impl<'t, 'a> TokenParser<'t, 'a> {
    pub(crate) fn new(tokens: &'t [Token<'a>], errors: &'t mut ParseErrors) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            errors,
        }
    }

    fn parse_document(&mut self) -> Vec<Node<'a>> {
        let mut children = Vec::with_capacity(16);
        while self.pos < self.tokens.len() {
            children.push(self.parse_node(Context::Block));
        }
        children
    }

    /// Dispatch the token under the cursor. Always advances.
    pub(crate) fn parse_node(&mut self, context: Context) -> Node<'a> {
        let tokens = self.tokens;
        let token = &tokens[self.pos];

        match token.kind {
            TokenKind::Text | TokenKind::Space => {
                self.pos += 1;
                text_node(token)
            }
            TokenKind::NextLine => {
                self.pos += 1;
                Node::LineBreak(token.span)
            }
            TokenKind::Header => self.parse_header(),
            TokenKind::Emphasis => self.parse_emphasis(),
            TokenKind::Strong if context == Context::Emphasis => {
                self.pos += 1;
                vanished_marker(token)
            }
            TokenKind::Strong => self.parse_strong(context),
            TokenKind::ListItem if context == Context::Block => self.parse_list(),
            TokenKind::ListItem => {
                self.pos += 1;
                text_node(token)
            }
        }
    }

    /// Header content always starts a fresh inline context, even when the
    /// header sits inside emphasis.
    fn parse_header(&mut self) -> Node<'a> {
        let start = self.pos;
        self.pos += 1;

        if !self.is_single_space(self.pos) {
            self.record(ParseError::missing_space(
                "header",
                self.tokens[start].span,
            ));
            return self.literal(start);
        }
        if self.depth >= MAX_NESTING {
            self.record(ParseError::nesting_too_deep(
                "header",
                self.tokens[start].span,
            ));
            return self.literal(start);
        }
        self.pos += 1;

        self.depth += 1;
        let content = self.parse_line(Context::Inline);
        self.depth -= 1;

        Node::Header(Header {
            content,
            span: self.span_from(start),
        })
    }

    /// Parse content until the next newline, which is left unconsumed.
    fn parse_line(&mut self, context: Context) -> Vec<Node<'a>> {
        let mut content = Vec::with_capacity(4);
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind == TokenKind::NextLine {
                break;
            }
            content.push(self.parse_node(context));
        }
        content
    }

    fn parse_list(&mut self) -> Node<'a> {
        let start = self.pos;

        if !self.is_item_start(start) {
            self.pos += 1;
            self.record(ParseError::missing_space(
                "list item",
                self.tokens[start].span,
            ));
            return self.literal(start);
        }

        let mut items = Vec::with_capacity(4);
        loop {
            items.push(self.parse_list_item());

            // A single newline before the next item keeps the list open.
            let continues = self.peek_kind(self.pos) == Some(TokenKind::NextLine)
                && self.is_item_start(self.pos + 1);
            if !continues {
                break;
            }
            self.pos += 1;
        }

        Node::List(List {
            items,
            span: self.span_from(start),
        })
    }

    fn parse_list_item(&mut self) -> ListItem<'a> {
        let start = self.pos;
        // Marker and its space.
        self.pos += 2;

        let content = self.parse_line(Context::Inline);

        ListItem {
            content,
            span: self.span_from(start),
        }
    }

    #[inline]
    fn is_item_start(&self, index: usize) -> bool {
        self.peek_kind(index) == Some(TokenKind::ListItem) && self.is_single_space(index + 1)
    }

    #[inline]
    fn is_single_space(&self, index: usize) -> bool {
        self.tokens
            .get(index)
            .is_some_and(|t| t.kind == TokenKind::Space && t.value == " ")
    }

    #[inline]
    pub(crate) fn peek_kind(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    /// Span from the token at `start` through the last consumed token.
    #[inline]
    pub(crate) fn span_from(&self, start: usize) -> Span {
        let last = self.pos.saturating_sub(1).max(start);
        self.tokens[start].span.merge(self.tokens[last].span)
    }

    /// Rebuild `tokens[start..pos]` as one text node.
    pub(crate) fn literal(&self, start: usize) -> Node<'a> {
        let consumed = &self.tokens[start..self.pos];
        let content = match consumed {
            [single] => single.value.clone(),
            _ => Cow::Owned(consumed.iter().map(|t| t.value.as_ref()).collect()),
        };
        Node::Text(Text {
            content,
            span: self.span_from(start),
        })
    }

    pub(crate) fn record(&mut self, error: ParseError) {
        log::debug!("rendering literally: {}", error);
        self.errors.push(error);
    }
}

#[inline]
fn text_node<'a>(token: &Token<'a>) -> Node<'a> {
    Node::Text(Text {
        content: token.value.clone(),
        span: token.span,
    })
}

/// A `__` swallowed inside emphasis.
#[inline]
pub(crate) fn vanished_marker<'a>(token: &Token<'a>) -> Node<'a> {
    Node::Text(Text {
        content: Cow::Borrowed(""),
        span: token.span,
    })
}
