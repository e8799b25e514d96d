//! Longest-match lexer (C3).

use crate::error::{LumexError, Result};
use crate::token::{Token, TokenKind, TOKEN_PATTERNS};
use log::{debug, warn};

/// Stateful cursor over a source string.
///
/// `advance()` performs one longest-match step, anchored exactly at the
/// cursor (no scanning ahead). `tokens()` yields a lazy, whitespace-dropping
/// stream terminated by an idempotent `EndOfFile`.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    cursor: usize,
    line: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: 0,
            line: 1,
        }
    }

    /// Attempts one longest-match step at the current cursor.
    ///
    /// Returns `Ok(Some(token))` on a match, `Ok(None)` at end of input, and
    /// `Err(LexicalError)` if the cursor is short of the end but no pattern
    /// matches.
    pub fn advance(&mut self) -> Result<Option<Token>> {
        if self.cursor >= self.source.len() {
            return Ok(None);
        }

        let mut best: Option<(TokenKind, &str)> = None;
        for (kind, regex) in TOKEN_PATTERNS.iter() {
            if let Some(m) = regex.find(&self.source[self.cursor..]) {
                let text = m.as_str();
                let is_longer = best.map(|(_, b)| text.len() > b.len()).unwrap_or(true);
                if is_longer {
                    best = Some((*kind, text));
                }
            }
        }

        match best {
            Some((kind, matched)) => {
                let lexeme = matched.to_string();
                let line = self.line;
                self.line += lexeme.matches('\n').count();
                self.cursor += lexeme.len();
                debug!("matched {:?} {:?} at line {}", kind, lexeme, line);
                Ok(Some(Token::new(kind, lexeme, line)))
            }
            None => {
                let remaining: String = self.source[self.cursor..].chars().take(16).collect();
                warn!("no pattern matched at cursor {}", self.cursor);
                Err(LumexError::LexicalError {
                    pos: self.cursor,
                    remaining,
                })
            }
        }
    }

    /// A lazy, restartable-from-scratch token stream, transparently dropping
    /// whitespace. Once end-of-input is reached, `EndOfFile` is yielded
    /// forever after (the iterator never ends).
    pub fn tokens(self) -> Tokens<'src> {
        Tokens {
            lexer: self,
            finished: false,
        }
    }
}

/// Iterator adapter returned by [`Lexer::tokens`].
pub struct Tokens<'src> {
    lexer: Lexer<'src>,
    finished: bool,
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return Some(Ok(Token::eof(self.lexer.line)));
        }
        loop {
            match self.lexer.advance() {
                Ok(Some(tok)) if tok.kind.is_whitespace() => continue,
                Ok(Some(tok)) => return Some(Ok(tok)),
                Ok(None) => {
                    self.finished = true;
                    return Some(Ok(Token::eof(self.lexer.line)));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokens()
            .map(|t| t.unwrap().kind)
            .take_while(|k| *k != TokenKind::EndOfFile)
            .collect()
    }

    #[test]
    fn drops_whitespace() {
        let kinds = kinds("x = 1;\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Integer,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn keyword_shadows_identifier() {
        let kinds = kinds("addfdtd;");
        assert_eq!(kinds, vec![TokenKind::AddFdtd, TokenKind::Semicolon]);
    }

    #[test]
    fn longer_keyword_wins_over_prefix_keyword() {
        let kinds = kinds("selectall;");
        assert_eq!(kinds, vec![TokenKind::SelectAll, TokenKind::Semicolon]);

        let kinds = kinds("select(\"x\");");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Select,
                TokenKind::LeftBracket,
                TokenKind::String,
                TokenKind::RightBracket,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn operators_disambiguate_by_length() {
        let kinds = kinds("x == 1 != 2 >= 3 <= 4");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::DoubleEqual,
                TokenKind::Integer,
                TokenKind::NotEqual,
                TokenKind::Integer,
                TokenKind::Gte,
                TokenKind::Integer,
                TokenKind::Lte,
                TokenKind::Integer,
            ]
        );
    }

    #[test]
    fn negative_float_is_minus_then_float() {
        let kinds = kinds("-1.5");
        assert_eq!(kinds, vec![TokenKind::Minus, TokenKind::Float]);
    }

    #[test]
    fn eof_is_idempotent() {
        let mut iter = Lexer::new("").tokens();
        assert_eq!(iter.next().unwrap().unwrap().kind, TokenKind::EndOfFile);
        assert_eq!(iter.next().unwrap().unwrap().kind, TokenKind::EndOfFile);
        assert_eq!(iter.next().unwrap().unwrap().kind, TokenKind::EndOfFile);
    }

    #[test]
    fn lexical_error_on_unmatched_input() {
        let mut lexer = Lexer::new("$$$");
        let err = lexer.advance().unwrap_err();
        assert!(matches!(err, LumexError::LexicalError { pos: 0, .. }));
    }

    #[test]
    fn line_tracking_counts_newlines() {
        let mut lexer = Lexer::new("x\ny\nz");
        let mut lines = Vec::new();
        while let Some(tok) = lexer.advance().unwrap() {
            if !tok.kind.is_whitespace() {
                lines.push(tok.line);
            }
        }
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn lexeme_concatenation_reproduces_source() {
        let source = "x = 1 + 2;\nif (x == 3) { y = 4; }\n";
        let mut lexer = Lexer::new(source);
        let mut rebuilt = String::new();
        while let Some(tok) = lexer.advance().unwrap() {
            rebuilt.push_str(&tok.lexeme);
        }
        assert_eq!(rebuilt, source);
    }
}
