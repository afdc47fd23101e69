use super::*;
use pretty_assertions::assert_eq;
use stepwise_ir::Span;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn keywords_and_atoms() {
    assert_eq!(
        kinds("let sum = 'a\\n' + 0x10;"),
        vec![
            TokenKind::Let,
            TokenKind::Ident("sum".into()),
            TokenKind::Eq,
            TokenKind::Str("a\n".into()),
            TokenKind::Plus,
            TokenKind::Number(16.0),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn newline_flag_marks_first_token_of_a_line() {
    let tokens = lex("a\nb /* x */ c /*\n*/ d").unwrap();
    let flags: Vec<bool> = tokens.iter().map(|t| t.flags.has_newline_before()).collect();
    assert_eq!(flags, vec![false, true, false, true, false]);
}

#[test]
fn spans_are_byte_ranges() {
    let tokens = lex("  foo(1)").unwrap();
    assert_eq!(tokens[0].span, Span::new(2, 5));
    assert_eq!(tokens[1].span, Span::new(5, 6));
    assert_eq!(tokens.last().map(|t| t.span), Some(Span::new(8, 8)));
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("1 2.5 .5 1e3"),
        vec![
            TokenKind::Number(1.0),
            TokenKind::Number(2.5),
            TokenKind::Number(0.5),
            TokenKind::Number(1000.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn malformed_number() {
    let err = lex("var a = 12abc;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MalformedNumber("12abc".into()));
    assert_eq!(err.span, Span::new(8, 13));
}

#[test]
fn invalid_escape() {
    let err = lex(r#""\q""#).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidEscape('q'));
}

#[test]
fn unsupported_operator_is_an_error() {
    let err = lex("a | b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnsupportedOperator("|".into()));
    assert_eq!(err.to_string(), "unsupported operator `|` at 2..3");
}

#[test]
fn reserved_words_are_kept() {
    assert_eq!(
        kinds("try"),
        vec![TokenKind::Reserved("try"), TokenKind::Eof]
    );
}
