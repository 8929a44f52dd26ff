//! Document tree → HTML.
//!
//! Pure structural mapping with no validation. Text is written as-is unless
//! [`RenderOptions::escape_html`] is set.

use crate::ast::{Document, ListItem, Node};

/// Options for HTML output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Encode `<`, `>` and `&` in text payloads.
    pub escape_html: bool,
}

impl RenderOptions {
    /// Default options: text is copied verbatim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable HTML escaping of text.
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}

/// Writes a document tree as an HTML string.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a whole document.
    pub fn render(&self, document: &Document<'_>) -> String {
        let mut out = String::with_capacity(document.span.len() as usize + 16);
        self.write_nodes(&document.children, &mut out);
        out
    }

    /// Render a single node and its descendants.
    pub fn render_node(&self, node: &Node<'_>) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_nodes(&self, nodes: &[Node<'_>], out: &mut String) {
        for node in nodes {
            self.write_node(node, out);
        }
    }

    fn write_node(&self, node: &Node<'_>, out: &mut String) {
        match node {
            Node::Header(header) => self.write_element("h1", &header.content, out),
            Node::Emphasis(emphasis) => self.write_element("em", &emphasis.content, out),
            Node::Strong(strong) => self.write_element("strong", &strong.content, out),
            Node::List(list) => {
                out.push_str("<ul>");
                for item in &list.items {
                    self.write_item(item, out);
                }
                out.push_str("</ul>");
            }
            Node::Text(text) => self.write_text(&text.content, out),
            Node::LineBreak(_) => {}
        }
    }

    fn write_item(&self, item: &ListItem<'_>, out: &mut String) {
        self.write_element("li", &item.content, out);
    }

    fn write_element(&self, tag: &str, children: &[Node<'_>], out: &mut String) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.write_nodes(children, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    #[inline]
    fn write_text(&self, text: &str, out: &mut String) {
        if self.options.escape_html {
            html_escape::encode_text_to_string(text, out);
        } else {
            out.push_str(text);
        }
    }
}

/// Render a document with default options.
pub fn render(document: &Document<'_>) -> String {
    HtmlRenderer::default().render(document)
}
