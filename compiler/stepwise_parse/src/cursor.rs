//! Token cursor for navigating the token stream.

use stepwise_ir::Span;
use stepwise_lexer::{Token, TokenKind};

/// Position in a token stream whose last token is always `Eof`.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> &TokenKind {
        let index = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Whether a line break separates the current token from the previous one.
    #[inline]
    pub fn newline_before(&self) -> bool {
        self.current().flags.has_newline_before()
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token; a no-op at `Eof`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[index]
    }
}
