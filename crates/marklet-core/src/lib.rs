//! # Marklet Core
//!
//! Converts a small markdown dialect into HTML.
//!
//! The dialect has headers (`# `), unordered lists (`- `), emphasis
//! (`_text_`), strong (`__text__`), backslash escapes and line breaks.
//! Markers that are not valid in context are kept as literal text.
//!
//! ## Quick Start
//!
//! ```rust
//! let html = marklet_core::convert("# Hello _world_");
//! assert_eq!(html, "<h1>Hello <em>world</em></h1>");
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! text ──lexer──▶ tokens ──parser──▶ Document ──render──▶ HTML
//! ```
//!
//! Each stage is usable on its own:
//!
//! ```rust
//! use marklet_core::lexer::tokenize;
//! use marklet_core::render::render;
//! use marklet_core::Parser;
//!
//! let tokens = tokenize("__bold__");
//! let doc = Parser::new().parse_tokens(&tokens);
//! assert_eq!(render(&doc), "<strong>bold</strong>");
//! ```
//!
//! ## Error Recovery
//!
//! Parsing never fails. Constructs that fall back to literal text are
//! reported:
//!
//! ```rust
//! use marklet_core::Parser;
//!
//! let result = Parser::new().parse_with_recovery("_unclosed");
//! assert_eq!(result.errors.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod span;

pub use ast::{Document, Node};
pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use parser::{ParseResult, Parser};
pub use render::{HtmlRenderer, RenderOptions};

/// Convert markdown to HTML with default options.
pub fn convert(markdown: &str) -> String {
    convert_with(markdown, &RenderOptions::default())
}

/// Convert markdown to HTML.
pub fn convert_with(markdown: &str, options: &RenderOptions) -> String {
    let document = Parser::new().parse(markdown);
    HtmlRenderer::new(*options).render(&document)
}
