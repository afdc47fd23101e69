//! Lexer errors.

use stepwise_ir::Span;
use thiserror::Error;

/// A lexer error located by byte span.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid escape `\\{0}` in string literal")]
    InvalidEscape(char),
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("unsupported operator `{0}`")]
    UnsupportedOperator(String),
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}
