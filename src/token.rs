//! Token catalogue and lexeme patterns (C2).
//!
//! Each terminal kind owns a regex lexeme pattern. Patterns are tried in
//! registration order; the lexer (`lexer.rs`) picks the *longest* match and
//! only falls back to registration order to break ties — which is what
//! makes keywords shadow the generic `Identifier` pattern (§4.2/§4.3):
//! `addfdtd` and `Identifier` both match all seven characters of `addfdtd`,
//! so whichever pattern is registered first wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The closed set of terminal identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Function,
    For,
    If,
    Else,
    Break,
    And,
    Or,
    Not,
    // Domain keywords
    AddFdtd,
    AddRect,
    AddSphere,
    AddPlane,
    AddDftMonitor,
    Set,
    SelectAll,
    UnselectAll,
    Select,
    ShiftSelect,
    // Literals
    Integer,
    Float,
    String,
    Identifier,
    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Equal,
    DoubleEqual,
    NotEqual,
    Gt,
    Gte,
    Lt,
    Lte,
    Bang,
    // Punctuation
    LeftBracket,
    RightBracket,
    LeftCurly,
    RightCurly,
    Semicolon,
    Colon,
    Comma,
    Questionmark,
    // Whitespace
    Space,
    NewLine,
    // Termination
    EndOfFile,
}

impl TokenKind {
    /// Whether this kind carries a converted semantic payload (an
    /// int/float/string/identifier value derived from its lexeme).
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Integer | TokenKind::Float | TokenKind::String | TokenKind::Identifier
        )
    }

    pub const fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::NewLine)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexed token: its kind, the exact matched source substring, and the
/// 1-indexed source line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::EndOfFile, "", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.kind, self.lexeme)
    }
}

/// Ordered `(kind, pattern)` table. Order matters only for tie-breaking
/// equal-length matches (keywords before `Identifier`).
const TOKEN_PATTERN_SOURCE: &[(TokenKind, &str)] = &[
    // Keywords (must precede Identifier)
    (TokenKind::Function, r"function"),
    (TokenKind::For, r"for"),
    (TokenKind::If, r"if"),
    (TokenKind::Else, r"else"),
    (TokenKind::Break, r"break"),
    (TokenKind::And, r"and"),
    (TokenKind::Or, r"or"),
    (TokenKind::Not, r"not"),
    // Domain keywords (must precede Identifier)
    (TokenKind::AddFdtd, r"addfdtd"),
    (TokenKind::AddRect, r"addrect"),
    (TokenKind::AddSphere, r"addsphere"),
    (TokenKind::AddPlane, r"addplane"),
    (TokenKind::AddDftMonitor, r"adddftmonitor"),
    (TokenKind::Set, r"set"),
    (TokenKind::SelectAll, r"selectall"),
    (TokenKind::UnselectAll, r"unselectall"),
    (TokenKind::Select, r"select"),
    (TokenKind::ShiftSelect, r"shiftselect"),
    // Literals
    (TokenKind::Float, r"[0-9]\.[0-9]+"),
    (TokenKind::Integer, r"[0-9]+"),
    (TokenKind::String, r#""(?:\\"|[^"])*""#),
    (TokenKind::Identifier, r"[A-Za-z][A-Za-z0-9]*"),
    // Operators (longest-match already disambiguates `==` from `=`, etc.)
    (TokenKind::Plus, r"\+"),
    (TokenKind::Minus, r"-"),
    (TokenKind::Multiply, r"\*"),
    (TokenKind::Divide, r"/"),
    (TokenKind::DoubleEqual, r"=="),
    (TokenKind::NotEqual, r"!="),
    (TokenKind::Equal, r"="),
    (TokenKind::Gte, r">="),
    (TokenKind::Gt, r">"),
    (TokenKind::Lte, r"<="),
    (TokenKind::Lt, r"<"),
    (TokenKind::Bang, r"!"),
    // Punctuation
    (TokenKind::LeftBracket, r"\("),
    (TokenKind::RightBracket, r"\)"),
    (TokenKind::LeftCurly, r"\{"),
    (TokenKind::RightCurly, r"\}"),
    (TokenKind::Semicolon, r";"),
    (TokenKind::Colon, r":"),
    (TokenKind::Comma, r","),
    (TokenKind::Questionmark, r"\?"),
    // Whitespace
    (TokenKind::Space, r"[ \t]+"),
    (TokenKind::NewLine, r"\r?\n"),
];

/// Compiled, anchored patterns in registration order.
pub static TOKEN_PATTERNS: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    TOKEN_PATTERN_SOURCE
        .iter()
        .map(|(kind, pattern)| {
            let anchored = format!("^(?:{})", pattern);
            (
                *kind,
                Regex::new(&anchored).expect("lumex token pattern must compile"),
            )
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_registered_before_identifier() {
        let identifier_pos = TOKEN_PATTERN_SOURCE
            .iter()
            .position(|(k, _)| *k == TokenKind::Identifier)
            .unwrap();
        for kind in [
            TokenKind::Function,
            TokenKind::For,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Break,
            TokenKind::AddFdtd,
            TokenKind::SelectAll,
            TokenKind::Select,
        ] {
            let pos = TOKEN_PATTERN_SOURCE
                .iter()
                .position(|(k, _)| *k == kind)
                .unwrap();
            assert!(pos < identifier_pos, "{:?} must precede Identifier", kind);
        }
    }

    #[test]
    fn patterns_compile() {
        assert_eq!(TOKEN_PATTERNS.len(), TOKEN_PATTERN_SOURCE.len());
    }
}
