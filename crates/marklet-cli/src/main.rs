//! Marklet CLI - Convert, inspect and validate marklet markdown
//!
//! Usage:
//!   mkl [OPTIONS] [COMMAND] <FILE | ->
//!
//! Commands:
//!   render    Convert to HTML (default)
//!   tokens    Show the token stream
//!   tree      Show the document tree
//!   validate  Report constructs that were rendered literally
//!   stats     Show document statistics

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use log::LevelFilter;
use marklet_core::ast::{ListItem, Node};
use marklet_core::lexer::{tokenize, Token};
use marklet_core::span::Span;
use marklet_core::{
    Document, HtmlRenderer, ParseError, ParseErrorKind, ParseErrors, Parser, RenderOptions,
};
use serde::Serialize;

fn main() {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;
    init_logging(config.verbose);

    let input = read_input(&config.input)?;
    log::debug!("read {} bytes from {}", input.len(), config.input);

    match config.command {
        Command::Render => cmd_render(&input, &config),
        Command::Tokens => cmd_tokens(&input, &config),
        Command::Tree => cmd_tree(&input, &config),
        Command::Validate => cmd_validate(&input, &config),
        Command::Stats => cmd_stats(&input, &config),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn read_input(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        Ok(input)
    } else {
        fs::read_to_string(source).map_err(|e| format!("failed to read '{}': {}", source, e))
    }
}

#[derive(Debug)]
struct Config {
    command: Command,
    input: String,
    format: OutputFormat,
    verbose: bool,
    options: RenderOptions,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Render,
    Tokens,
    Tree,
    Validate,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut command = Command::Render;
    let mut format = OutputFormat::Text;
    let mut verbose = false;
    let mut options = RenderOptions::new();
    let mut input = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "-V" | "--version" => {
                println!("mkl {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "-v" | "--verbose" => verbose = true,
            "-j" | "--json" => format = OutputFormat::Json,
            "-e" | "--escape-html" => options = options.with_escape_html(true),
            "render" => command = Command::Render,
            "tokens" => command = Command::Tokens,
            "tree" => command = Command::Tree,
            "validate" => command = Command::Validate,
            "stats" => command = Command::Stats,
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("unknown option: {}", arg));
            }
            _ => {
                if input.is_some() {
                    return Err("multiple inputs specified".to_string());
                }
                input = Some(arg.clone());
            }
        }
    }

    let input = input.ok_or_else(|| "no input specified (use - for stdin)".to_string())?;

    Ok(Config {
        command,
        input,
        format,
        verbose,
        options,
    })
}

fn print_help() {
    eprintln!(
        r#"mkl - marklet markdown to HTML converter

USAGE:
    mkl [OPTIONS] [COMMAND] <FILE | ->

COMMANDS:
    render      Convert to HTML (default)
    tokens      Show the token stream
    tree        Show the document tree
    validate    Report constructs that were rendered literally
    stats       Show document statistics

OPTIONS:
    -e, --escape-html    Encode <, > and & in text
    -j, --json           Output in JSON format
    -v, --verbose        Log every fallback to stderr
    -h, --help           Print help information
    -V, --version        Print version information

EXAMPLES:
    mkl notes.md              Convert a file to HTML
    echo '_hi_' | mkl -       Convert stdin
    mkl tree -j notes.md      Output the document tree as JSON
    mkl validate notes.md     Exit with 1 if anything degraded to text
"#
    );
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(input: &str, config: &Config) -> Result<(), String> {
    let result = Parser::new().parse_with_recovery(input);
    let html = HtmlRenderer::new(config.options).render(&result.document);

    match config.format {
        OutputFormat::Json => print_json(&JsonRender {
            html: &html,
            errors: convert_errors(&result.errors),
        }),
        OutputFormat::Text => {
            println!("{}", html);
            Ok(())
        }
    }
}

// =============================================================================
// Tokens Command
// =============================================================================

fn cmd_tokens(input: &str, config: &Config) -> Result<(), String> {
    let tokens = tokenize(input);

    match config.format {
        OutputFormat::Json => {
            let tokens: Vec<JsonToken> = tokens.iter().map(convert_token).collect();
            print_json(&tokens)
        }
        OutputFormat::Text => {
            for token in &tokens {
                println!(
                    "{:>6}..{:<6} {:<10} {:?}",
                    token.span.start,
                    token.span.end,
                    token.kind.as_str(),
                    token.value
                );
            }
            Ok(())
        }
    }
}

// =============================================================================
// Tree Command
// =============================================================================

fn cmd_tree(input: &str, config: &Config) -> Result<(), String> {
    let document = Parser::new().parse(input);

    match config.format {
        OutputFormat::Json => print_json(&convert_document(&document)),
        OutputFormat::Text => {
            println!(
                "Document {}..{} ({} nodes)",
                document.span.start,
                document.span.end,
                document.children.len()
            );
            for node in &document.children {
                print_node(node, 1);
            }
            Ok(())
        }
    }
}

fn print_node(node: &Node, indent: usize) {
    let prefix = "  ".repeat(indent);
    let span = node.span();

    match node {
        Node::Text(t) => println!("{}Text {}..{} {:?}", prefix, span.start, span.end, t.content),
        Node::LineBreak(_) => println!("{}LineBreak {}..{}", prefix, span.start, span.end),
        Node::List(list) => {
            println!("{}List {}..{}", prefix, span.start, span.end);
            for item in &list.items {
                print_item(item, indent + 1);
            }
        }
        Node::Header(_) | Node::Emphasis(_) | Node::Strong(_) => {
            println!("{}{} {}..{}", prefix, node_name(node), span.start, span.end);
            for child in node.children() {
                print_node(child, indent + 1);
            }
        }
    }
}

fn print_item(item: &ListItem, indent: usize) {
    let prefix = "  ".repeat(indent);
    println!("{}Item {}..{}", prefix, item.span.start, item.span.end);
    for child in &item.content {
        print_node(child, indent + 1);
    }
}

fn node_name(node: &Node) -> &'static str {
    match node {
        Node::Header(_) => "Header",
        Node::Emphasis(_) => "Emphasis",
        Node::Strong(_) => "Strong",
        Node::List(_) => "List",
        Node::Text(_) => "Text",
        Node::LineBreak(_) => "LineBreak",
    }
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(input: &str, config: &Config) -> Result<(), String> {
    let result = Parser::new().parse_with_recovery(input);

    if matches!(config.format, OutputFormat::Json) {
        print_json(&JsonValidation {
            valid: result.is_ok(),
            errors: convert_errors(&result.errors),
        })?;
    } else if result.is_ok() {
        println!("Valid: every construct parsed as written");
    } else {
        eprintln!("Invalid: {} construct(s) rendered literally", result.errors.len());
        for error in result.errors.iter() {
            eprintln!("  - [{}] {}", error.kind.as_str(), error);
        }
    }

    if result.is_ok() {
        Ok(())
    } else {
        Err(format!("{} error(s) found", result.errors.len()))
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &str, config: &Config) -> Result<(), String> {
    let tokens = tokenize(input);
    let result = Parser::new().parse_with_recovery(input);
    let stats = DocumentStats::from_document(&result.document, &result.errors, input, &tokens);

    if matches!(config.format, OutputFormat::Json) {
        return print_json(&stats);
    }

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Headers:        {}", stats.headers);
    println!("  Lists:          {}", stats.lists);
    println!("  List items:     {}", stats.list_items);
    println!("  Emphasis:       {}", stats.emphasis);
    println!("  Strong:         {}", stats.strong);
    println!("  Text nodes:     {}", stats.text_nodes);
    println!();
    println!("Size:");
    println!("  Bytes:          {}", stats.bytes);
    println!("  Lines:          {}", stats.lines);
    println!("  Tokens:         {}", stats.tokens);
    println!();
    println!("Fallbacks:        {}", stats.fallbacks.total);
    for (kind, count) in stats.fallbacks.by_kind() {
        if count > 0 {
            println!("  {:<20} {}", kind.as_str(), count);
        }
    }

    Ok(())
}

#[derive(Serialize, Default)]
struct DocumentStats {
    headers: usize,
    lists: usize,
    list_items: usize,
    emphasis: usize,
    strong: usize,
    text_nodes: usize,
    bytes: usize,
    lines: usize,
    tokens: usize,
    fallbacks: FallbackStats,
}

#[derive(Serialize, Default)]
struct FallbackStats {
    total: usize,
    unclosed_delimiter: usize,
    invalid_opening: usize,
    invalid_closing: usize,
    mid_word_whitespace: usize,
    missing_space: usize,
    nesting_too_deep: usize,
}

impl FallbackStats {
    fn from_errors(errors: &ParseErrors) -> Self {
        Self {
            total: errors.len(),
            unclosed_delimiter: errors.count(ParseErrorKind::UnclosedDelimiter),
            invalid_opening: errors.count(ParseErrorKind::InvalidOpening),
            invalid_closing: errors.count(ParseErrorKind::InvalidClosing),
            mid_word_whitespace: errors.count(ParseErrorKind::MidWordWhitespace),
            missing_space: errors.count(ParseErrorKind::MissingSpace),
            nesting_too_deep: errors.count(ParseErrorKind::NestingTooDeep),
        }
    }

    fn by_kind(&self) -> [(ParseErrorKind, usize); 6] {
        [
            (ParseErrorKind::UnclosedDelimiter, self.unclosed_delimiter),
            (ParseErrorKind::InvalidOpening, self.invalid_opening),
            (ParseErrorKind::InvalidClosing, self.invalid_closing),
            (ParseErrorKind::MidWordWhitespace, self.mid_word_whitespace),
            (ParseErrorKind::MissingSpace, self.missing_space),
            (ParseErrorKind::NestingTooDeep, self.nesting_too_deep),
        ]
    }
}

impl DocumentStats {
    fn from_document(doc: &Document, errors: &ParseErrors, input: &str, tokens: &[Token]) -> Self {
        let mut stats = Self {
            bytes: input.len(),
            lines: input.lines().count(),
            tokens: tokens.len(),
            fallbacks: FallbackStats::from_errors(errors),
            ..Self::default()
        };

        stats.count_nodes(&doc.children);
        stats
    }

    fn count_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Header(_) => self.headers += 1,
                Node::Emphasis(_) => self.emphasis += 1,
                Node::Strong(_) => self.strong += 1,
                Node::Text(_) => self.text_nodes += 1,
                Node::LineBreak(_) => {}
                Node::List(list) => {
                    self.lists += 1;
                    self.list_items += list.items.len();
                    for item in &list.items {
                        self.count_nodes(&item.content);
                    }
                }
            }
            self.count_nodes(node.children());
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonSpan {
    start: u32,
    end: u32,
}

impl From<Span> for JsonSpan {
    fn from(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

#[derive(Serialize)]
struct JsonToken<'a> {
    kind: &'static str,
    value: &'a str,
    span: JsonSpan,
}

#[derive(Serialize)]
struct JsonError<'a> {
    kind: &'static str,
    message: &'a str,
    span: JsonSpan,
}

#[derive(Serialize)]
struct JsonRender<'a> {
    html: &'a str,
    errors: Vec<JsonError<'a>>,
}

#[derive(Serialize)]
struct JsonValidation<'a> {
    valid: bool,
    errors: Vec<JsonError<'a>>,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    span: JsonSpan,
    children: Vec<JsonNode<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonNode<'a> {
    Header {
        span: JsonSpan,
        content: Vec<JsonNode<'a>>,
    },
    Emphasis {
        span: JsonSpan,
        content: Vec<JsonNode<'a>>,
    },
    Strong {
        span: JsonSpan,
        content: Vec<JsonNode<'a>>,
    },
    List {
        span: JsonSpan,
        items: Vec<JsonListItem<'a>>,
    },
    Text {
        span: JsonSpan,
        content: &'a str,
    },
    LineBreak {
        span: JsonSpan,
    },
}

#[derive(Serialize)]
struct JsonListItem<'a> {
    span: JsonSpan,
    content: Vec<JsonNode<'a>>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn convert_token<'a>(token: &'a Token) -> JsonToken<'a> {
    JsonToken {
        kind: token.kind.as_str(),
        value: &token.value,
        span: token.span.into(),
    }
}

fn convert_errors(errors: &ParseErrors) -> Vec<JsonError<'_>> {
    errors.iter().map(convert_error).collect()
}

fn convert_error(error: &ParseError) -> JsonError<'_> {
    JsonError {
        kind: error.kind.as_str(),
        message: &error.message,
        span: error.span.into(),
    }
}

fn convert_document<'a>(doc: &'a Document) -> JsonDocument<'a> {
    JsonDocument {
        span: doc.span.into(),
        children: convert_nodes(&doc.children),
    }
}

fn convert_nodes<'a>(nodes: &'a [Node]) -> Vec<JsonNode<'a>> {
    nodes.iter().map(convert_node).collect()
}

fn convert_node<'a>(node: &'a Node) -> JsonNode<'a> {
    let span = node.span().into();
    match node {
        Node::Header(h) => JsonNode::Header {
            span,
            content: convert_nodes(&h.content),
        },
        Node::Emphasis(e) => JsonNode::Emphasis {
            span,
            content: convert_nodes(&e.content),
        },
        Node::Strong(s) => JsonNode::Strong {
            span,
            content: convert_nodes(&s.content),
        },
        Node::List(l) => JsonNode::List {
            span,
            items: l
                .items
                .iter()
                .map(|item| JsonListItem {
                    span: item.span.into(),
                    content: convert_nodes(&item.content),
                })
                .collect(),
        },
        Node::Text(t) => JsonNode::Text {
            span,
            content: &t.content,
        },
        Node::LineBreak(_) => JsonNode::LineBreak { span },
    }
}
