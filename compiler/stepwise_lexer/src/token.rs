//! Cooked tokens.

use std::fmt;

use bitflags::bitflags;
use stepwise_ir::Span;

/// Token kind after keyword resolution and literal cooking.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Atoms
    Ident(String),
    Number(f64),
    Str(String),

    // Keywords
    Var,
    Let,
    Const,
    Function,
    Return,
    If,
    Else,
    For,
    While,
    Break,
    Continue,
    Throw,
    Debugger,
    New,
    True,
    False,
    Null,
    Typeof,
    /// A JavaScript keyword the language does not support (`try`, `class`, ...).
    Reserved(&'static str),

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Bang,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    /// `=>`; recognised only to reject arrow functions with a clear message.
    Arrow,

    Eof,
}

impl TokenKind {
    /// Short human-readable description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Number(_) => "number".to_owned(),
            TokenKind::Str(_) => "string".to_owned(),
            TokenKind::Reserved(word) => format!("`{word}`"),
            TokenKind::Eof => "end of input".to_owned(),
            other => format!("`{}`", other.punct_or_keyword()),
        }
    }

    fn punct_or_keyword(&self) -> &'static str {
        match self {
            TokenKind::Var => "var",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Function => "function",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Throw => "throw",
            TokenKind::Debugger => "debugger",
            TokenKind::New => "new",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Typeof => "typeof",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Bang => "!",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::EqEqEq => "===",
            TokenKind::NotEqEq => "!==",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Arrow => "=>",
            TokenKind::Ident(_)
            | TokenKind::Number(_)
            | TokenKind::Str(_)
            | TokenKind::Reserved(_)
            | TokenKind::Eof => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

bitflags! {
    /// Per-token trivia flags packed in one byte.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// A line terminator (possibly inside a block comment) preceded this token.
        const NEWLINE_BEFORE = 1 << 0;
        /// A comment preceded this token.
        const TRIVIA_BEFORE = 1 << 1;
    }
}

impl Default for TokenFlags {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TokenFlags {
    pub const EMPTY: Self = Self::empty();

    #[inline]
    pub const fn has_newline_before(self) -> bool {
        self.contains(Self::NEWLINE_BEFORE)
    }
}

const _: () = assert!(size_of::<TokenFlags>() == 1);

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, flags: TokenFlags) -> Self {
        Token { kind, span, flags }
    }
}
