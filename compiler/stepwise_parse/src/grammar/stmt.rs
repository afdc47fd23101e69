//! Statement parsing.

use stepwise_ir::{NodeId, NodeKind, Span, VarKind};
use stepwise_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        stepwise_stack::ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        match self.current_kind().clone() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const => self.parse_var_declaration(true),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Break | TokenKind::Continue => self.parse_jump(),
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon()?;
                let span = self.span_from(start);
                Ok(self.alloc(NodeKind::DebuggerStatement, span))
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(self.alloc(NodeKind::EmptyStatement, start))
            }
            TokenKind::Reserved(word) => Err(unsupported_keyword(word, start)),
            _ => {
                let expression = self.parse_expr()?;
                self.consume_semicolon()?;
                let span = self.span_from(start);
                Ok(self.alloc(NodeKind::ExpressionStatement { expression }, span))
            }
        }
    }

    /// Restricted automatic semicolon insertion: a statement may end without
    /// `;` before `}`, at end of input, or when a line break follows it.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.cursor.is_at_end()
            || self.cursor.newline_before()
        {
            return Ok(());
        }
        if self.check(&TokenKind::Arrow) {
            return Err(ParseError::unsupported("arrow functions", self.current_span()));
        }
        Err(self.unexpected("`;`"))
    }

    pub(crate) fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.unexpected("`}`"));
            }
            body.push(self.parse_statement()?);
        }
        self.advance();
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::BlockStatement { body }, span))
    }

    /// `var a = 1, b`. In statement position the terminating semicolon is
    /// consumed and covered by the span; a `for` init clause has none.
    pub(crate) fn parse_var_declaration(&mut self, statement: bool) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        let kind = match self.advance().kind {
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => VarKind::Var,
        };
        let mut declarations = Vec::new();
        loop {
            let id = self.parse_binding_identifier()?;
            let init = if self.eat(&TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            let span = self.span_from(self.node_span(id));
            declarations.push(self.alloc(NodeKind::VariableDeclarator { id, init }, span));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        if statement {
            self.consume_semicolon()?;
        }
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::VariableDeclaration { kind, declarations }, span))
    }

    fn parse_function_declaration(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::Function)?;
        let id = self.parse_binding_identifier()?;
        let (params, body) = self.parse_function_rest()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::FunctionDeclaration { id, params, body }, span))
    }

    /// `(params) { body }` shared by declarations and expressions.
    pub(crate) fn parse_function_rest(&mut self) -> Result<(Vec<NodeId>, NodeId), ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_binding_identifier()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let saved_loops = std::mem::replace(&mut self.loop_depth, 0);
        self.function_depth += 1;
        let body = self.parse_block();
        self.function_depth -= 1;
        self.loop_depth = saved_loops;
        Ok((params, body?))
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::If)?;
        let test = self.parse_paren_expr()?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat(&TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
            span,
        ))
    }

    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;
        let init = match self.current_kind() {
            TokenKind::Semicolon => None,
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                Some(self.parse_var_declaration(false)?)
            }
            _ => Some(self.parse_expr()?),
        };
        if self.check(&TokenKind::Reserved("of")) || self.check(&TokenKind::Reserved("in")) {
            return Err(ParseError::unsupported("for-in/for-of loops", self.current_span()));
        }
        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_loop_body()?;
        let span = self.span_from(start);
        Ok(self.alloc(
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
            span,
        ))
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::While)?;
        let test = self.parse_paren_expr()?;
        let body = self.parse_loop_body()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::WhileStatement { test, body }, span))
    }

    fn parse_loop_body(&mut self) -> Result<NodeId, ParseError> {
        self.loop_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        body
    }

    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::Return)?;
        if self.function_depth == 0 {
            return Err(ParseError::new(
                ParseErrorKind::IllegalReturn,
                start,
                "`return` outside of function",
            ));
        }
        let argument = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume_semicolon()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::ReturnStatement { argument }, span))
    }

    fn parse_throw(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::Throw)?;
        if self.cursor.newline_before() {
            return Err(ParseError::new(
                ParseErrorKind::NewlineAfterThrow,
                self.current_span(),
                "illegal newline after `throw`",
            ));
        }
        let argument = self.parse_expr()?;
        self.consume_semicolon()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::ThrowStatement { argument }, span))
    }

    fn parse_jump(&mut self) -> Result<NodeId, ParseError> {
        let token = self.advance();
        let (is_break, start) = (token.kind == TokenKind::Break, token.span);
        if self.loop_depth == 0 {
            let (kind, message) = if is_break {
                (ParseErrorKind::IllegalBreak, "`break` outside of loop")
            } else {
                (ParseErrorKind::IllegalContinue, "`continue` outside of loop")
            };
            return Err(ParseError::new(kind, start, message));
        }
        self.consume_semicolon()?;
        let span = self.span_from(start);
        let kind = if is_break {
            NodeKind::BreakStatement
        } else {
            NodeKind::ContinueStatement
        };
        Ok(self.alloc(kind, span))
    }

    /// A restricted production ends here (`return` followed by a line break).
    fn at_statement_end(&self) -> bool {
        self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.cursor.is_at_end()
            || self.cursor.newline_before()
    }

    fn parse_paren_expr(&mut self) -> Result<NodeId, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(expr)
    }

    pub(crate) fn parse_binding_identifier(&mut self) -> Result<NodeId, ParseError> {
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok(self.alloc(NodeKind::Identifier { name }, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }
}

fn unsupported_keyword(word: &str, span: Span) -> ParseError {
    let what = match word {
        "try" | "catch" | "finally" => "try/catch statements",
        "class" | "extends" | "super" => "classes",
        "switch" | "case" | "default" => "switch statements",
        "do" => "do-while loops",
        "import" | "export" => "module imports/exports",
        _ => {
            return ParseError::new(
                ParseErrorKind::Unsupported,
                span,
                format!("`{word}` is not supported"),
            );
        }
    };
    ParseError::unsupported(what, span)
}
