//! Document tree produced by the parser.
//!
//! The tree is a closed set of node types:
//!
//! - **Borrowing**: text payloads use `Cow<'a, str>` and point into the input
//!   whenever no escape or fallback rebuilt them
//! - **Span-tracked**: every node records the source bytes it was built from
//! - **Immutable**: built once per parse and only read afterwards

use crate::span::Span;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document<'a> {
    /// Top-level nodes in source order.
    pub children: Vec<Node<'a>>,
    /// Source span covering all tokens.
    pub span: Span,
}

impl<'a> Document<'a> {
    /// Whether the document has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node below the document root.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// `# ` heading line.
    Header(Header<'a>),
    /// `_emphasis_`.
    Emphasis(Emphasis<'a>),
    /// `__strong__`.
    Strong(Strong<'a>),
    /// Run of consecutive `- ` items.
    List(List<'a>),
    /// Literal text.
    Text(Text<'a>),
    /// A newline; renders to nothing.
    LineBreak(Span),
}

impl<'a> Node<'a> {
    /// Source span of this node.
    pub fn span(&self) -> Span {
        match self {
            Node::Header(n) => n.span,
            Node::Emphasis(n) => n.span,
            Node::Strong(n) => n.span,
            Node::List(n) => n.span,
            Node::Text(n) => n.span,
            Node::LineBreak(span) => *span,
        }
    }

    /// Child nodes, if this is a container.
    ///
    /// Lists expose their items through [`List::items`] instead.
    pub fn children(&self) -> &[Node<'a>] {
        match self {
            Node::Header(n) => &n.content,
            Node::Emphasis(n) => &n.content,
            Node::Strong(n) => &n.content,
            Node::List(_) | Node::Text(_) | Node::LineBreak(_) => &[],
        }
    }
}

/// Heading line. The dialect has a single heading level.
#[derive(Debug, Clone, PartialEq)]
pub struct Header<'a> {
    /// Inline content up to the end of the line.
    pub content: Vec<Node<'a>>,
    /// Source span, marker included.
    pub span: Span,
}

/// Emphasized (italic) text.
#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis<'a> {
    /// Nested content.
    pub content: Vec<Node<'a>>,
    /// Source span, delimiters included.
    pub span: Span,
}

/// Strong (bold) text.
#[derive(Debug, Clone, PartialEq)]
pub struct Strong<'a> {
    /// Nested content; may hold [`Emphasis`].
    pub content: Vec<Node<'a>>,
    /// Source span, delimiters included.
    pub span: Span,
}

/// Unordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct List<'a> {
    /// List items.
    pub items: Vec<ListItem<'a>>,
    /// Source span.
    pub span: Span,
}

/// A single list item.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem<'a> {
    /// Inline content up to the end of the line.
    pub content: Vec<Node<'a>>,
    /// Source span, marker included.
    pub span: Span,
}

/// Plain text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Text<'a> {
    /// The text content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}
