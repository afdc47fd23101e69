//! Keyword resolution.
//!
//! Supported keywords map to their own token kinds. JavaScript keywords the
//! language does not implement resolve to `TokenKind::Reserved` so the parser
//! can reject them by name instead of treating them as identifiers.

use crate::TokenKind;

const RESERVED: &[&str] = &[
    "async",
    "await",
    "case",
    "catch",
    "class",
    "default",
    "delete",
    "do",
    "enum",
    "export",
    "extends",
    "finally",
    "import",
    "in",
    "instanceof",
    "of",
    "super",
    "switch",
    "this",
    "try",
    "void",
    "with",
    "yield",
];

/// Resolve `text` to a keyword token, `None` for plain identifiers.
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "var" => TokenKind::Var,
        "let" => TokenKind::Let,
        "const" => TokenKind::Const,
        "function" => TokenKind::Function,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "while" => TokenKind::While,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "throw" => TokenKind::Throw,
        "debugger" => TokenKind::Debugger,
        "new" => TokenKind::New,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        "typeof" => TokenKind::Typeof,
        _ => return RESERVED
            .iter()
            .find(|word| **word == text)
            .map(|word| TokenKind::Reserved(word)),
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_keywords() {
        assert_eq!(lookup("var"), Some(TokenKind::Var));
        assert_eq!(lookup("debugger"), Some(TokenKind::Debugger));
        assert_eq!(lookup("typeof"), Some(TokenKind::Typeof));
    }

    #[test]
    fn reserved_words() {
        assert_eq!(lookup("try"), Some(TokenKind::Reserved("try")));
        assert_eq!(lookup("class"), Some(TokenKind::Reserved("class")));
    }

    #[test]
    fn identifiers_are_not_keywords() {
        assert_eq!(lookup("undefined"), None);
        assert_eq!(lookup("sum"), None);
        assert_eq!(lookup("Var"), None);
    }
}
