//! Parse errors.

use stepwise_ir::Span;
use stepwise_lexer::{LexError, TokenKind};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The lexer rejected the input.
    Lex,
    UnexpectedToken,
    /// Valid JavaScript the language does not implement.
    Unsupported,
    InvalidAssignmentTarget,
    IllegalReturn,
    IllegalBreak,
    IllegalContinue,
    NewlineAfterThrow,
}

/// A parse failure located by byte span.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} ({span})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        ParseError {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn unexpected(expected: &str, found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken,
            span,
            format!("expected {expected}, found {found}"),
        )
    }

    pub fn unsupported(what: &str, span: Span) -> Self {
        ParseError::new(
            ParseErrorKind::Unsupported,
            span,
            format!("{what} are not supported"),
        )
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex, err.span, err.kind.to_string())
    }
}
