//! Byte cursor over the source text.
//!
//! The cursor never indexes out of bounds: reads past the end return `0`,
//! which no token starts with, so the scanner dispatches it to EOF.

pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.bytes.len()
    }

    /// Byte at the current position, `0` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.peek_at(0)
    }

    /// Byte `n` positions ahead, `0` past EOF.
    #[inline]
    pub fn peek_at(&self, n: u32) -> u8 {
        self.bytes
            .get((self.pos + n) as usize)
            .copied()
            .unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Advance while `pred` holds for the current byte.
    #[inline]
    pub fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip a whole UTF-8 scalar starting at the current byte.
    pub fn advance_char(&mut self) {
        let first = self.current();
        let width = match first {
            0x00..=0xBF => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            _ => 4,
        };
        self.advance_n(width);
    }
}
