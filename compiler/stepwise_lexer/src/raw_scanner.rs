//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The raw layer does not resolve keywords, unescape strings or parse
//! numbers; that is deferred to cooking. Error conditions are encoded as
//! `RawTag` variants, not as `Result::Err`, so the scanner always makes
//! progress and the token lengths always sum to the source length.

use crate::cursor::Cursor;

/// Raw token kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RawTag {
    // Trivia
    Whitespace,
    Newline,
    LineComment,
    BlockComment,

    // Atoms
    Ident,
    Number,
    String,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,

    // Operators
    Plus,
    PlusPlus,
    PlusEq,
    Minus,
    MinusMinus,
    MinusEq,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,
    Bang,
    BangEq,
    BangEqEq,
    Eq,
    EqEq,
    EqEqEq,
    Arrow,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    AmpAmp,
    PipePipe,

    // Errors
    UnterminatedString,
    UnterminatedBlockComment,
    /// Valid JS operator character this language does not support (`&`, `|`, `^`, `~`, ...).
    Unsupported,
    InvalidByte,

    Eof,
}

impl RawTag {
    /// Whitespace, newlines and comments.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace | RawTag::Newline | RawTag::LineComment | RawTag::BlockComment
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> RawScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        RawScanner {
            cursor: Cursor::new(source),
        }
    }

    /// Produce the next raw token; `Eof` with `len == 0` once exhausted.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return RawToken {
                tag: RawTag::Eof,
                len: 0,
            };
        }
        let tag = match self.cursor.current() {
            b' ' | b'\t' | 0x0B | 0x0C => {
                self.cursor
                    .eat_while(|b| matches!(b, b' ' | b'\t' | 0x0B | 0x0C));
                RawTag::Whitespace
            }
            b'\r' => {
                self.cursor.advance();
                if self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
                RawTag::Newline
            }
            b'\n' => {
                self.cursor.advance();
                RawTag::Newline
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => {
                self.cursor.eat_while(is_ident_continue);
                RawTag::Ident
            }
            b'0'..=b'9' => self.number(),
            b'.' if self.cursor.peek_at(1).is_ascii_digit() => self.number(),
            b'"' | b'\'' => self.string(),
            b'/' => self.slash(),
            b'(' => self.single(RawTag::LeftParen),
            b')' => self.single(RawTag::RightParen),
            b'{' => self.single(RawTag::LeftBrace),
            b'}' => self.single(RawTag::RightBrace),
            b'[' => self.single(RawTag::LeftBracket),
            b']' => self.single(RawTag::RightBracket),
            b';' => self.single(RawTag::Semicolon),
            b',' => self.single(RawTag::Comma),
            b'.' => self.single(RawTag::Dot),
            b':' => self.single(RawTag::Colon),
            b'?' => self.single(RawTag::Question),
            b'+' => self.with_followers(RawTag::Plus, &[(b'+', RawTag::PlusPlus), (b'=', RawTag::PlusEq)]),
            b'-' => self.with_followers(RawTag::Minus, &[(b'-', RawTag::MinusMinus), (b'=', RawTag::MinusEq)]),
            b'*' => self.with_followers(RawTag::Star, &[(b'=', RawTag::StarEq)]),
            b'%' => self.with_followers(RawTag::Percent, &[(b'=', RawTag::PercentEq)]),
            b'<' => self.with_followers(RawTag::Less, &[(b'=', RawTag::LessEq)]),
            b'>' => self.with_followers(RawTag::Greater, &[(b'=', RawTag::GreaterEq)]),
            b'!' => self.equality(RawTag::Bang, RawTag::BangEq, RawTag::BangEqEq),
            b'=' => {
                if self.cursor.peek_at(1) == b'>' {
                    self.cursor.advance_n(2);
                    RawTag::Arrow
                } else {
                    self.equality(RawTag::Eq, RawTag::EqEq, RawTag::EqEqEq)
                }
            }
            b'&' => self.doubled(b'&', RawTag::AmpAmp),
            b'|' => self.doubled(b'|', RawTag::PipePipe),
            b'^' | b'~' | b'#' | b'@' | b'`' | b'\\' => self.single(RawTag::Unsupported),
            _ => {
                self.cursor.advance_char();
                RawTag::InvalidByte
            }
        };
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    fn single(&mut self, tag: RawTag) -> RawTag {
        self.cursor.advance();
        tag
    }

    fn with_followers(&mut self, base: RawTag, followers: &[(u8, RawTag)]) -> RawTag {
        self.cursor.advance();
        let next = self.cursor.current();
        for (byte, tag) in followers {
            if next == *byte {
                self.cursor.advance();
                return *tag;
            }
        }
        base
    }

    /// `!`/`=` followed by up to two `=`.
    fn equality(&mut self, one: RawTag, two: RawTag, three: RawTag) -> RawTag {
        self.cursor.advance();
        if self.cursor.current() != b'=' {
            return one;
        }
        self.cursor.advance();
        if self.cursor.current() != b'=' {
            return two;
        }
        self.cursor.advance();
        three
    }

    /// `&&` / `||`; a lone `&` or `|` is a bitwise operator we do not support.
    fn doubled(&mut self, byte: u8, tag: RawTag) -> RawTag {
        self.cursor.advance();
        if self.cursor.current() == byte {
            self.cursor.advance();
            tag
        } else {
            RawTag::Unsupported
        }
    }

    fn number(&mut self) -> RawTag {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek_at(1), b'x' | b'X') {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            return RawTag::Number;
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let sign = matches!(self.cursor.peek_at(1), b'+' | b'-');
            let digit_at = if sign { 2 } else { 1 };
            if self.cursor.peek_at(digit_at).is_ascii_digit() {
                self.cursor.advance_n(digit_at);
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
        }
        // `1abc` is one malformed number token, rejected during cooking.
        self.cursor.eat_while(is_ident_continue);
        RawTag::Number
    }

    fn string(&mut self) -> RawTag {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            match self.cursor.current() {
                _ if self.cursor.is_eof() => return RawTag::UnterminatedString,
                b'\n' | b'\r' => return RawTag::UnterminatedString,
                b'\\' => {
                    self.cursor.advance();
                    self.cursor.advance_char();
                }
                b if b == quote => {
                    self.cursor.advance();
                    return RawTag::String;
                }
                _ => self.cursor.advance_char(),
            }
        }
    }

    fn slash(&mut self) -> RawTag {
        match self.cursor.peek_at(1) {
            b'/' => {
                self.cursor.eat_while(|b| b != b'\n' && b != b'\r');
                RawTag::LineComment
            }
            b'*' => {
                self.cursor.advance_n(2);
                loop {
                    if self.cursor.is_eof() {
                        return RawTag::UnterminatedBlockComment;
                    }
                    if self.cursor.current() == b'*' && self.cursor.peek_at(1) == b'/' {
                        self.cursor.advance_n(2);
                        return RawTag::BlockComment;
                    }
                    self.cursor.advance();
                }
            }
            b'=' => {
                self.cursor.advance_n(2);
                RawTag::SlashEq
            }
            _ => self.single(RawTag::Slash),
        }
    }
}

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}
