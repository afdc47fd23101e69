//! Lexer for the Stepwise script language.
//!
//! Two layers:
//! - [`raw_scanner`]: byte-level scanner producing `(RawTag, len)` pairs
//! - cooking: keyword resolution, literal parsing, trivia folded into
//!   [`TokenFlags`]
//!
//! The parser relies on [`TokenFlags::NEWLINE_BEFORE`] for automatic
//! semicolon insertion.

mod cooker;
mod cursor;
mod keywords;
mod lex_error;
pub mod raw_scanner;
mod token;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenFlags, TokenKind};

/// Lex `source` into tokens terminated by a single `Eof`.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut cooker = cooker::TokenCooker::new(source);
    let mut tokens = Vec::with_capacity(source.len() / 3 + 1);
    loop {
        let token = cooker.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests;
