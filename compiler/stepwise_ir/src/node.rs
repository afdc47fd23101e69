//! Syntax tree nodes.
//!
//! Nodes are flat: children are referenced by [`NodeId`] into the owning
//! [`SyntaxTree`](crate::SyntaxTree). Type names follow ESTree because they
//! are shown verbatim to the user in exception traces.

use std::fmt;

use smallvec::SmallVec;

use crate::{LinePosition, Span};

/// Index into the node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Start and end line/column of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceLocation {
    pub start: LinePosition,
    pub end: LinePosition,
}

/// Whether the source was parsed as a classic script or a module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

/// Declaration keyword of a `VariableDeclaration`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    /// `let` and `const` are block scoped.
    #[inline]
    pub fn is_lexical(self) -> bool {
        matches!(self, VarKind::Let | VarKind::Const)
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// Literal payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Null,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `==`
    LooseEq,
    /// `!=`
    LooseNotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::LooseEq => "==",
            BinaryOp::LooseNotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    TypeOf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

/// Assignment operator; compound forms carry the binary operator they apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Compound(BinaryOp),
}

/// Node payload. Child slots hold [`NodeId`]s.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },

    // Statements
    VariableDeclaration {
        kind: VarKind,
        declarations: Vec<NodeId>,
    },
    VariableDeclarator {
        id: NodeId,
        init: Option<NodeId>,
    },
    FunctionDeclaration {
        id: NodeId,
        params: Vec<NodeId>,
        body: NodeId,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    BlockStatement {
        body: Vec<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    ForStatement {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    ReturnStatement {
        argument: Option<NodeId>,
    },
    ThrowStatement {
        argument: NodeId,
    },
    BreakStatement,
    ContinueStatement,
    DebuggerStatement,
    EmptyStatement,

    // Expressions
    Identifier {
        name: String,
    },
    Literal {
        value: Literal,
    },
    ArrayExpression {
        elements: Vec<NodeId>,
    },
    ObjectExpression {
        properties: Vec<NodeId>,
    },
    Property {
        key: String,
        value: NodeId,
    },
    FunctionExpression {
        id: Option<NodeId>,
        params: Vec<NodeId>,
        body: NodeId,
    },
    UnaryExpression {
        operator: UnaryOp,
        argument: NodeId,
    },
    UpdateExpression {
        operator: UpdateOp,
        prefix: bool,
        argument: NodeId,
    },
    BinaryExpression {
        operator: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    LogicalExpression {
        operator: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        operator: AssignOp,
        left: NodeId,
        right: NodeId,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    NewExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberExpression {
        object: NodeId,
        property: NodeId,
        computed: bool,
    },
}

impl NodeKind {
    /// ESTree type name.
    pub const fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "Program",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
            NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            NodeKind::BlockStatement { .. } => "BlockStatement",
            NodeKind::IfStatement { .. } => "IfStatement",
            NodeKind::ForStatement { .. } => "ForStatement",
            NodeKind::WhileStatement { .. } => "WhileStatement",
            NodeKind::ReturnStatement { .. } => "ReturnStatement",
            NodeKind::ThrowStatement { .. } => "ThrowStatement",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::ArrayExpression { .. } => "ArrayExpression",
            NodeKind::ObjectExpression { .. } => "ObjectExpression",
            NodeKind::Property { .. } => "Property",
            NodeKind::FunctionExpression { .. } => "FunctionExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::UpdateExpression { .. } => "UpdateExpression",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::LogicalExpression { .. } => "LogicalExpression",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            NodeKind::CallExpression { .. } => "CallExpression",
            NodeKind::NewExpression { .. } => "NewExpression",
            NodeKind::MemberExpression { .. } => "MemberExpression",
        }
    }

    /// Whether this node kind is a statement (including declarations).
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::VariableDeclaration { .. }
                | NodeKind::FunctionDeclaration { .. }
                | NodeKind::ExpressionStatement { .. }
                | NodeKind::BlockStatement { .. }
                | NodeKind::IfStatement { .. }
                | NodeKind::ForStatement { .. }
                | NodeKind::WhileStatement { .. }
                | NodeKind::ReturnStatement { .. }
                | NodeKind::ThrowStatement { .. }
                | NodeKind::BreakStatement
                | NodeKind::ContinueStatement
                | NodeKind::DebuggerStatement
                | NodeKind::EmptyStatement
        )
    }

    /// Direct children in source order.
    pub fn children(&self) -> SmallVec<[NodeId; 4]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::Program { body }
            | NodeKind::BlockStatement { body } => out.extend(body.iter().copied()),
            NodeKind::VariableDeclaration { declarations, .. } => {
                out.extend(declarations.iter().copied());
            }
            NodeKind::VariableDeclarator { id, init } => {
                out.push(*id);
                out.extend(*init);
            }
            NodeKind::FunctionDeclaration { id, params, body } => {
                out.push(*id);
                out.extend(params.iter().copied());
                out.push(*body);
            }
            NodeKind::FunctionExpression { id, params, body } => {
                out.extend(*id);
                out.extend(params.iter().copied());
                out.push(*body);
            }
            NodeKind::ExpressionStatement { expression } => out.push(*expression),
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.extend(*alternate);
            }
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                out.extend(*init);
                out.extend(*test);
                out.extend(*update);
                out.push(*body);
            }
            NodeKind::WhileStatement { test, body } => {
                out.push(*test);
                out.push(*body);
            }
            NodeKind::ReturnStatement { argument } => out.extend(*argument),
            NodeKind::ThrowStatement { argument } => out.push(*argument),
            NodeKind::BreakStatement
            | NodeKind::ContinueStatement
            | NodeKind::DebuggerStatement
            | NodeKind::EmptyStatement
            | NodeKind::Identifier { .. }
            | NodeKind::Literal { .. } => {}
            NodeKind::ArrayExpression { elements } => out.extend(elements.iter().copied()),
            NodeKind::ObjectExpression { properties } => out.extend(properties.iter().copied()),
            NodeKind::Property { value, .. } => out.push(*value),
            NodeKind::UnaryExpression { argument, .. }
            | NodeKind::UpdateExpression { argument, .. } => out.push(*argument),
            NodeKind::BinaryExpression { left, right, .. }
            | NodeKind::LogicalExpression { left, right, .. }
            | NodeKind::AssignmentExpression { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                out.push(*test);
                out.push(*consequent);
                out.push(*alternate);
            }
            NodeKind::CallExpression { callee, arguments }
            | NodeKind::NewExpression { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments.iter().copied());
            }
            NodeKind::MemberExpression {
                object, property, ..
            } => {
                out.push(*object);
                out.push(*property);
            }
        }
        out
    }
}

/// A syntax node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    /// Line/column range, present when the tree was parsed with locations.
    pub loc: Option<SourceLocation>,
    /// Enclosing node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Transient halt marker set by the breakpoint binder before execution.
    pub is_breakpoint: bool,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node {
            kind,
            span,
            loc: None,
            parent: None,
            is_breakpoint: false,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// 1-based start line, if locations were recorded.
    #[inline]
    pub fn start_line(&self) -> Option<u32> {
        self.loc.map(|loc| loc.start.line)
    }
}
