//! Integration tests for the tokenizer

use std::borrow::Cow;

use marklet_core::lexer::{tokenize, Token, TokenKind};
use marklet_core::span::Span;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).iter().map(|t| t.kind).collect()
}

fn values(input: &str) -> Vec<String> {
    tokenize(input).iter().map(|t| t.value.to_string()).collect()
}

// ============================================================================
// Plain Text, Spaces and Newlines
// ============================================================================

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_plain_text_is_single_token() {
    let tokens = tokenize("простойтекст");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].value, "простойтекст");
}

#[test]
fn test_only_spaces_is_single_space_token() {
    let tokens = tokenize("   ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Space);
    assert_eq!(tokens[0].value, "   ");
}

#[test]
fn test_space_run_is_not_split() {
    assert_eq!(
        kinds("много   пробелов"),
        [TokenKind::Text, TokenKind::Space, TokenKind::Text]
    );
    assert_eq!(values("много   пробелов"), ["много", "   ", "пробелов"]);
}

#[test]
fn test_each_newline_is_its_own_token() {
    let tokens = tokenize("\n\n\n");
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::NextLine));
}

#[test]
fn test_newline_between_lines() {
    assert_eq!(
        kinds("строка1\nстрока2"),
        [TokenKind::Text, TokenKind::NextLine, TokenKind::Text]
    );
}

#[test]
fn test_tab_is_text() {
    assert_eq!(kinds("a\tb"), [TokenKind::Text]);
}

// ============================================================================
// Underscore Runs
// ============================================================================

#[test]
fn test_single_underscore_at_start() {
    assert_eq!(kinds("_курсив"), [TokenKind::Emphasis, TokenKind::Text]);
    assert_eq!(values("_курсив"), ["_", "курсив"]);
}

#[test]
fn test_single_underscore_at_end() {
    assert_eq!(kinds("курсив_"), [TokenKind::Text, TokenKind::Emphasis]);
}

#[test]
fn test_emphasis_between_text() {
    assert_eq!(
        kinds("текст _курсив_ текст"),
        [
            TokenKind::Text,
            TokenKind::Space,
            TokenKind::Emphasis,
            TokenKind::Text,
            TokenKind::Emphasis,
            TokenKind::Space,
            TokenKind::Text,
        ]
    );
}

#[test]
fn test_double_underscore_is_strong() {
    assert_eq!(kinds("__жирный"), [TokenKind::Strong, TokenKind::Text]);
    assert_eq!(kinds("жирный__"), [TokenKind::Text, TokenKind::Strong]);
    assert_eq!(values("жирный__"), ["жирный", "__"]);
}

#[test]
fn test_three_or_more_underscores_are_text() {
    for run in ["___", "____", "_______"] {
        let tokens = tokenize(run);
        assert_eq!(tokens.len(), 1, "run {:?}", run);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].value, run);
    }
}

#[test]
fn test_underscore_run_is_separate_from_adjacent_text() {
    assert_eq!(
        kinds("a___b"),
        [TokenKind::Text, TokenKind::Text, TokenKind::Text]
    );
    assert_eq!(values("a___b"), ["a", "___", "b"]);
}

// ============================================================================
// Line Markers
// ============================================================================

#[test]
fn test_header_at_start_of_line() {
    assert_eq!(
        kinds("# заголовок"),
        [TokenKind::Header, TokenKind::Space, TokenKind::Text]
    );
}

#[test]
fn test_header_after_newline() {
    assert_eq!(
        kinds("a\n# b"),
        [
            TokenKind::Text,
            TokenKind::NextLine,
            TokenKind::Header,
            TokenKind::Space,
            TokenKind::Text,
        ]
    );
}

#[test]
fn test_hash_without_space_is_text() {
    let tokens = tokenize("#Заголовок");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Header));
    assert_eq!(values("#Заголовок"), ["#", "Заголовок"]);
}

#[test]
fn test_hash_mid_line_is_text() {
    assert_eq!(
        kinds("Текст # не"),
        [
            TokenKind::Text,
            TokenKind::Space,
            TokenKind::Text,
            TokenKind::Space,
            TokenKind::Text,
        ]
    );
}

#[test]
fn test_list_marker_at_start_of_line() {
    assert_eq!(
        kinds("- пункт\n- еще"),
        [
            TokenKind::ListItem,
            TokenKind::Space,
            TokenKind::Text,
            TokenKind::NextLine,
            TokenKind::ListItem,
            TokenKind::Space,
            TokenKind::Text,
        ]
    );
}

#[test]
fn test_dash_without_space_or_mid_line_is_text() {
    assert_eq!(values("-пункт"), ["-", "пункт"]);
    assert_eq!(kinds("-пункт"), [TokenKind::Text, TokenKind::Text]);
    assert_eq!(kinds("a - b")[2], TokenKind::Text);
}

#[test]
fn test_marker_at_end_of_input_is_text() {
    assert_eq!(kinds("#"), [TokenKind::Text]);
    assert_eq!(kinds("-"), [TokenKind::Text]);
}

// ============================================================================
// Escapes
// ============================================================================

#[test]
fn test_escaped_underscores_join_text() {
    let tokens = tokenize(r"\_текст\_");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].value, "_текст_");
    assert!(matches!(tokens[0].value, Cow::Owned(_)));
}

#[test]
fn test_every_escapable_character() {
    for c in ['_', '\\', ' ', '#', '-'] {
        let input = format!("a\\{}b", c);
        let tokens = tokenize(&input);
        assert_eq!(tokens.len(), 1, "escaping {:?}", c);
        assert_eq!(tokens[0].value, format!("a{}b", c));
    }
}

#[test]
fn test_backslash_before_ordinary_char_is_literal() {
    let tokens = tokenize(r"сим\волы");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, r"сим\волы");
    assert!(matches!(tokens[0].value, Cow::Borrowed(_)));
}

#[test]
fn test_trailing_backslash_is_literal() {
    assert_eq!(values("текст\\"), ["текст\\"]);
}

#[test]
fn test_escaped_backslash_does_not_escape_next() {
    assert_eq!(
        kinds(r"\\_x_"),
        [
            TokenKind::Text,
            TokenKind::Emphasis,
            TokenKind::Text,
            TokenKind::Emphasis,
        ]
    );
    assert_eq!(values(r"\\_x_")[0], "\\");
}

#[test]
fn test_escaped_line_marker_is_text() {
    assert_eq!(values(r"\- не пункт"), ["-", " ", "не", " ", "пункт"]);
    assert_eq!(kinds(r"\# x")[0], TokenKind::Text);
}

// ============================================================================
// Spans
// ============================================================================

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = tokenize("Обычный _курсив_ и __жирный__ текст");
    let expected = [
        Token::new(TokenKind::Text, "Обычный", Span::new(0, 14)),
        Token::new(TokenKind::Space, " ", Span::new(14, 15)),
        Token::new(TokenKind::Emphasis, "_", Span::new(15, 16)),
        Token::new(TokenKind::Text, "курсив", Span::new(16, 28)),
        Token::new(TokenKind::Emphasis, "_", Span::new(28, 29)),
        Token::new(TokenKind::Space, " ", Span::new(29, 30)),
        Token::new(TokenKind::Text, "и", Span::new(30, 32)),
        Token::new(TokenKind::Space, " ", Span::new(32, 33)),
        Token::new(TokenKind::Strong, "__", Span::new(33, 35)),
        Token::new(TokenKind::Text, "жирный", Span::new(35, 47)),
        Token::new(TokenKind::Strong, "__", Span::new(47, 49)),
        Token::new(TokenKind::Space, " ", Span::new(49, 50)),
        Token::new(TokenKind::Text, "текст", Span::new(50, 60)),
    ];
    assert_eq!(tokens, expected);
}

#[test]
fn test_escaped_text_span_covers_source() {
    let tokens = tokenize(r"a \_b");
    assert_eq!(tokens[2].value, "_b");
    assert_eq!(tokens[2].span, Span::new(2, 5));
}

#[test]
fn test_spans_tile_the_input() {
    let input = "# Заголовок\n- _a_ \\_ __b__\n\n___ c\\d #e -f\n";
    let tokens = tokenize(input);
    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.span.start, offset, "gap before {:?}", token);
        offset = token.span.end;
    }
    assert_eq!(offset as usize, input.len());
}

#[test]
fn test_token_spans_are_never_empty() {
    let tokens = tokenize("a\n\n_b_ __c__ \\_");
    for token in &tokens {
        assert!(!token.span.is_empty(), "empty span for {:?}", token);
        assert!(token.span.contains(token.span.start));
        assert!(!token.span.contains(token.span.end));
    }
    assert_eq!(tokens.last().map(|t| t.span.len()), Some(2));
}

#[test]
fn test_rare_byte_far_after_many_spaces() {
    let input = format!("{}\\_x -y\n# z", "слово ".repeat(2_000));
    let tokens = tokenize(&input);
    let tail: Vec<(TokenKind, String)> = tokens[tokens.len() - 8..tokens.len() - 1]
        .iter()
        .map(|t| (t.kind, t.value.to_string()))
        .collect();
    assert_eq!(
        tail,
        [
            (TokenKind::Text, "_x".to_string()),
            (TokenKind::Space, " ".to_string()),
            (TokenKind::Text, "-".to_string()),
            (TokenKind::Text, "y".to_string()),
            (TokenKind::NextLine, "\n".to_string()),
            (TokenKind::Header, "#".to_string()),
            (TokenKind::Space, " ".to_string()),
        ]
    );
    assert_eq!(tokens.last().map(|t| t.value.as_ref()), Some("z"));
}
