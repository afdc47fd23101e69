//! Expression parsing.
//!
//! Precedence, lowest first: assignment, conditional, `||`, `&&`, equality,
//! relational, additive, multiplicative, unary, postfix update, call/member,
//! primary.

use stepwise_ir::{
    AssignOp, BinaryOp, Literal, LogicalOp, NodeId, NodeKind, Span, UnaryOp, UpdateOp,
};
use stepwise_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// Parse an expression. Sequence expressions are not supported, so this
    /// is an assignment expression.
    pub(crate) fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        self.parse_assignment()
    }

    pub(crate) fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        stepwise_stack::ensure_sufficient_stack(|| self.parse_assignment_inner())
    }

    fn parse_assignment_inner(&mut self) -> Result<NodeId, ParseError> {
        let left = self.parse_conditional()?;
        let Some(operator) = self.match_assign_op() else {
            return Ok(left);
        };
        self.check_assignment_target(left)?;
        self.advance();
        let right = self.parse_assignment()?;
        let span = self.node_span(left).merge(self.node_span(right));
        Ok(self.alloc(
            NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            },
            span,
        ))
    }

    fn parse_conditional(&mut self) -> Result<NodeId, ParseError> {
        let test = self.parse_logical_or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment()?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;
        let span = self.node_span(test).merge(self.node_span(alternate));
        Ok(self.alloc(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            span,
        ))
    }

    fn parse_logical_or(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_logical_and()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.parse_logical_and()?;
            left = self.logical(LogicalOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_equality()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.parse_equality()?;
            left = self.logical(LogicalOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_relational()?;
        while let Some(op) = self.match_equality_op() {
            self.advance();
            let right = self.parse_relational()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_relational_op() {
            self.advance();
            let right = self.parse_additive()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_unary()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeId, ParseError> {
        stepwise_stack::ensure_sufficient_stack(|| self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span();
        if let Some(operator) = self.match_unary_op() {
            self.advance();
            let argument = self.parse_unary()?;
            let span = start.merge(self.node_span(argument));
            return Ok(self.alloc(NodeKind::UnaryExpression { operator, argument }, span));
        }
        if let Some(operator) = self.match_update_op() {
            self.advance();
            let argument = self.parse_unary()?;
            self.check_assignment_target(argument)?;
            let span = start.merge(self.node_span(argument));
            return Ok(self.alloc(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                },
                span,
            ));
        }
        self.parse_postfix_update()
    }

    /// `x++` / `x--`; a line break before the operator ends the expression.
    fn parse_postfix_update(&mut self) -> Result<NodeId, ParseError> {
        let argument = self.parse_call_member()?;
        if self.cursor.newline_before() {
            return Ok(argument);
        }
        let Some(operator) = self.match_update_op() else {
            return Ok(argument);
        };
        self.check_assignment_target(argument)?;
        let end = self.advance().span;
        let span = self.node_span(argument).merge(end);
        Ok(self.alloc(
            NodeKind::UpdateExpression {
                operator,
                prefix: false,
                argument,
            },
            span,
        ))
    }

    fn parse_call_member(&mut self) -> Result<NodeId, ParseError> {
        let mut expr = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            expr = match self.current_kind() {
                TokenKind::LParen => {
                    let arguments = self.parse_arguments()?;
                    let span = self.span_from(self.node_span(expr));
                    self.alloc(
                        NodeKind::CallExpression {
                            callee: expr,
                            arguments,
                        },
                        span,
                    )
                }
                TokenKind::Dot | TokenKind::LBracket => self.parse_member(expr)?,
                _ => return Ok(expr),
            };
        }
    }

    /// `new Callee(args)`; the argument list is optional.
    fn parse_new(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::New)?;
        let mut callee = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while matches!(self.current_kind(), TokenKind::Dot | TokenKind::LBracket) {
            callee = self.parse_member(callee)?;
        }
        let arguments = if self.check(&TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::NewExpression { callee, arguments }, span))
    }

    fn parse_member(&mut self, object: NodeId) -> Result<NodeId, ParseError> {
        let computed = self.check(&TokenKind::LBracket);
        self.advance();
        let property = if computed {
            let property = self.parse_expr()?;
            self.expect(&TokenKind::RBracket)?;
            property
        } else {
            self.parse_property_name()?
        };
        let span = self.span_from(self.node_span(object));
        Ok(self.alloc(
            NodeKind::MemberExpression {
                object,
                property,
                computed,
            },
            span,
        ))
    }

    /// Identifier after `.`; reserved words are valid property names.
    fn parse_property_name(&mut self) -> Result<NodeId, ParseError> {
        let name = match self.current_kind() {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Reserved(word) => (*word).to_owned(),
            _ => return Err(self.unexpected("property name")),
        };
        let span = self.advance().span;
        Ok(self.alloc(NodeKind::Identifier { name }, span))
    }

    fn parse_arguments(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut arguments = Vec::new();
        while !self.check(&TokenKind::RParen) {
            arguments.push(self.parse_assignment()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let span = self.current_span();
        let literal = match self.current_kind().clone() {
            TokenKind::Number(n) => Literal::Number(n),
            TokenKind::Str(s) => Literal::String(s),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Null => Literal::Null,
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::Arrow) {
                    return Err(ParseError::unsupported("arrow functions", self.current_span()));
                }
                return Ok(self.alloc(NodeKind::Identifier { name }, span));
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                if self.check(&TokenKind::Arrow) {
                    return Err(ParseError::unsupported("arrow functions", self.current_span()));
                }
                return Ok(expr);
            }
            TokenKind::LBracket => return self.parse_array(),
            TokenKind::LBrace => return self.parse_object(),
            TokenKind::Function => return self.parse_function_expression(),
            TokenKind::Reserved(word) => {
                return Err(ParseError::new(
                    ParseErrorKind::Unsupported,
                    span,
                    format!("`{word}` is not supported"),
                ));
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(self.alloc(NodeKind::Literal { value: literal }, span))
    }

    fn parse_array(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            elements.push(self.parse_assignment()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::ArrayExpression { elements }, span))
    }

    fn parse_object(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut properties = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let key_span = self.current_span();
            let key = match self.current_kind() {
                TokenKind::Ident(name) | TokenKind::Str(name) => name.clone(),
                TokenKind::Number(n) => stepwise_ir::format_number(*n),
                TokenKind::Reserved(word) => (*word).to_owned(),
                _ => return Err(self.unexpected("property key")),
            };
            self.advance();
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_assignment()?;
            let span = key_span.merge(self.node_span(value));
            properties.push(self.alloc(NodeKind::Property { key, value }, span));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::ObjectExpression { properties }, span))
    }

    fn parse_function_expression(&mut self) -> Result<NodeId, ParseError> {
        let start = self.expect(&TokenKind::Function)?;
        let id = if matches!(self.current_kind(), TokenKind::Ident(_)) {
            Some(self.parse_binding_identifier()?)
        } else {
            None
        };
        let (params, body) = self.parse_function_rest()?;
        let span = self.span_from(start);
        Ok(self.alloc(NodeKind::FunctionExpression { id, params, body }, span))
    }

    fn check_assignment_target(&self, target: NodeId) -> Result<(), ParseError> {
        match self.node_kind(target) {
            NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. } => Ok(()),
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                self.node_span(target),
                "invalid assignment target",
            )),
        }
    }

    fn binary(&mut self, operator: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        let span: Span = self.node_span(left).merge(self.node_span(right));
        self.alloc(
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            },
            span,
        )
    }

    fn logical(&mut self, operator: LogicalOp, left: NodeId, right: NodeId) -> NodeId {
        let span = self.node_span(left).merge(self.node_span(right));
        self.alloc(
            NodeKind::LogicalExpression {
                operator,
                left,
                right,
            },
            span,
        )
    }

    // Operator matching

    fn match_assign_op(&self) -> Option<AssignOp> {
        let op = match self.current_kind() {
            TokenKind::Eq => return Some(AssignOp::Assign),
            TokenKind::PlusEq => BinaryOp::Add,
            TokenKind::MinusEq => BinaryOp::Sub,
            TokenKind::StarEq => BinaryOp::Mul,
            TokenKind::SlashEq => BinaryOp::Div,
            TokenKind::PercentEq => BinaryOp::Rem,
            _ => return None,
        };
        Some(AssignOp::Compound(op))
    }

    fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::LooseEq),
            TokenKind::NotEq => Some(BinaryOp::LooseNotEq),
            TokenKind::EqEqEq => Some(BinaryOp::StrictEq),
            TokenKind::NotEqEq => Some(BinaryOp::StrictNotEq),
            _ => None,
        }
    }

    fn match_relational_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            _ => None,
        }
    }

    fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Typeof => Some(UnaryOp::TypeOf),
            _ => None,
        }
    }

    fn match_update_op(&self) -> Option<UpdateOp> {
        match self.current_kind() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }
}
