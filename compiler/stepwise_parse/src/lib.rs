//! Recursive descent parser for the Stepwise script language.
//!
//! Produces a flat [`SyntaxTree`] with ESTree node names. Every node carries a
//! byte span; with [`ParseOptions::locations`] it also carries 1-based
//! line / 0-based column positions.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use stepwise_ir::{
    LineOffsetTable, Node, NodeId, NodeKind, SourceLocation, SourceType, Span, SyntaxTree,
};
use stepwise_lexer::{Token, TokenKind};

/// Parser options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub source_type: SourceType,
    /// Attach line/column locations to every node.
    pub locations: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            source_type: SourceType::Script,
            locations: true,
        }
    }
}

/// Parse `source` into a syntax tree.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(source: &str, options: ParseOptions) -> Result<SyntaxTree, ParseError> {
    let tokens = stepwise_lexer::lex(source)?;
    let mut parser = Parser::new(source, tokens, options);
    let tree = parser.parse_program()?;
    tracing::debug!(nodes = tree.len(), "parsed");
    Ok(tree)
}

/// Parser state.
pub struct Parser<'a> {
    source: &'a str,
    cursor: Cursor,
    tree: SyntaxTree,
    lines: Option<LineOffsetTable>,
    /// Nesting depth of function bodies; `return` is legal when non-zero.
    function_depth: u32,
    /// Loops enclosing the current statement within the current function.
    loop_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>, options: ParseOptions) -> Self {
        Parser {
            source,
            cursor: Cursor::new(tokens),
            tree: SyntaxTree::new(options.source_type),
            lines: options.locations.then(|| LineOffsetTable::build(source)),
            function_depth: 0,
            loop_depth: 0,
        }
    }

    /// Parse a whole program and finish the tree.
    pub fn parse_program(&mut self) -> Result<SyntaxTree, ParseError> {
        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            body.push(self.parse_statement()?);
        }
        let span = Span::new(0, self.source.len() as u32);
        let root = self.alloc(NodeKind::Program { body }, span);
        let mut tree = std::mem::take(&mut self.tree);
        tree.finish(root);
        Ok(tree)
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &Token {
        self.cursor.advance()
    }

    /// Consume `kind` if it is the current token.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or fail with "expected `what`".
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current_kind(), self.current_span())
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.cursor.previous_span().end.max(start.end))
    }

    /// Allocate a node, attaching its line/column location when enabled.
    fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let mut node = Node::new(kind, span);
        if let Some(lines) = &self.lines {
            node.loc = Some(SourceLocation {
                start: lines.position(self.source, span.start),
                end: lines.position(self.source, span.end),
            });
        }
        self.tree.alloc(node)
    }

    #[inline]
    fn node_span(&self, id: NodeId) -> Span {
        self.tree.span(id)
    }

    #[inline]
    fn node_kind(&self, id: NodeId) -> &NodeKind {
        self.tree.kind(id)
    }
}

#[cfg(test)]
mod tests;
