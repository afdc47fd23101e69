//! Cooking layer: turns raw `(tag, len)` pairs into [`Token`]s.
//!
//! Trivia is dropped here; its only trace is the [`TokenFlags`] of the next
//! significant token. Keywords are resolved, numbers parsed and strings
//! unescaped.

use stepwise_ir::Span;

use crate::keywords;
use crate::raw_scanner::{RawScanner, RawTag};
use crate::{LexError, LexErrorKind, Token, TokenFlags, TokenKind};

pub(crate) struct TokenCooker<'a> {
    source: &'a str,
    scanner: RawScanner<'a>,
    offset: u32,
    pending: TokenFlags,
}

impl<'a> TokenCooker<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        TokenCooker {
            source,
            scanner: RawScanner::new(source),
            offset: 0,
            pending: TokenFlags::EMPTY,
        }
    }

    /// Next significant token; the final token is always `Eof`.
    pub(crate) fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let raw = self.scanner.next_token();
            let start = self.offset;
            self.offset += raw.len;
            let span = Span::new(start, self.offset);
            let text = &self.source[span.to_range()];

            let kind = match raw.tag {
                RawTag::Whitespace => continue,
                RawTag::Newline => {
                    self.pending.insert(TokenFlags::NEWLINE_BEFORE);
                    continue;
                }
                RawTag::LineComment => {
                    self.pending.insert(TokenFlags::TRIVIA_BEFORE);
                    continue;
                }
                RawTag::BlockComment => {
                    self.pending.insert(TokenFlags::TRIVIA_BEFORE);
                    if text.contains(['\n', '\r']) {
                        self.pending.insert(TokenFlags::NEWLINE_BEFORE);
                    }
                    continue;
                }
                RawTag::Ident => {
                    keywords::lookup(text).unwrap_or_else(|| TokenKind::Ident(text.to_owned()))
                }
                RawTag::Number => TokenKind::Number(cook_number(text, span)?),
                RawTag::String => TokenKind::Str(cook_string(text, span)?),
                RawTag::LeftParen => TokenKind::LParen,
                RawTag::RightParen => TokenKind::RParen,
                RawTag::LeftBrace => TokenKind::LBrace,
                RawTag::RightBrace => TokenKind::RBrace,
                RawTag::LeftBracket => TokenKind::LBracket,
                RawTag::RightBracket => TokenKind::RBracket,
                RawTag::Semicolon => TokenKind::Semicolon,
                RawTag::Comma => TokenKind::Comma,
                RawTag::Dot => TokenKind::Dot,
                RawTag::Colon => TokenKind::Colon,
                RawTag::Question => TokenKind::Question,
                RawTag::Plus => TokenKind::Plus,
                RawTag::PlusPlus => TokenKind::PlusPlus,
                RawTag::PlusEq => TokenKind::PlusEq,
                RawTag::Minus => TokenKind::Minus,
                RawTag::MinusMinus => TokenKind::MinusMinus,
                RawTag::MinusEq => TokenKind::MinusEq,
                RawTag::Star => TokenKind::Star,
                RawTag::StarEq => TokenKind::StarEq,
                RawTag::Slash => TokenKind::Slash,
                RawTag::SlashEq => TokenKind::SlashEq,
                RawTag::Percent => TokenKind::Percent,
                RawTag::PercentEq => TokenKind::PercentEq,
                RawTag::Bang => TokenKind::Bang,
                RawTag::BangEq => TokenKind::NotEq,
                RawTag::BangEqEq => TokenKind::NotEqEq,
                RawTag::Eq => TokenKind::Eq,
                RawTag::EqEq => TokenKind::EqEq,
                RawTag::EqEqEq => TokenKind::EqEqEq,
                RawTag::Arrow => TokenKind::Arrow,
                RawTag::Less => TokenKind::Lt,
                RawTag::LessEq => TokenKind::LtEq,
                RawTag::Greater => TokenKind::Gt,
                RawTag::GreaterEq => TokenKind::GtEq,
                RawTag::AmpAmp => TokenKind::AndAnd,
                RawTag::PipePipe => TokenKind::OrOr,
                RawTag::Eof => TokenKind::Eof,
                RawTag::UnterminatedString => {
                    return Err(LexError::new(LexErrorKind::UnterminatedString, span));
                }
                RawTag::UnterminatedBlockComment => {
                    return Err(LexError::new(LexErrorKind::UnterminatedBlockComment, span));
                }
                RawTag::Unsupported => {
                    return Err(LexError::new(
                        LexErrorKind::UnsupportedOperator(text.to_owned()),
                        span,
                    ));
                }
                RawTag::InvalidByte => {
                    let ch = text.chars().next().unwrap_or('\u{FFFD}');
                    return Err(LexError::new(LexErrorKind::UnexpectedChar(ch), span));
                }
            };
            let flags = std::mem::take(&mut self.pending);
            return Ok(Token::new(kind, span, flags));
        }
    }
}

fn cook_number(text: &str, span: Span) -> Result<f64, LexError> {
    let malformed = || LexError::new(LexErrorKind::MalformedNumber(text.to_owned()), span);
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .map_err(|_| malformed());
    }
    text.parse::<f64>().map_err(|_| malformed())
}

fn cook_string(text: &str, span: Span) -> Result<String, LexError> {
    // Strip the quotes; the raw scanner guarantees both are present.
    let body = &text[1..text.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('v') => out.push('\u{000B}'),
            Some(c @ ('\\' | '\'' | '"')) => out.push(c),
            Some(other) => {
                return Err(LexError::new(LexErrorKind::InvalidEscape(other), span));
            }
            None => return Err(LexError::new(LexErrorKind::UnterminatedString, span)),
        }
    }
    Ok(out)
}
