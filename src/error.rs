//! Error types for the lumex translator.

use thiserror::Error;

/// Errors that can occur while lexing, analyzing a grammar, or parsing.
#[derive(Error, Debug)]
pub enum LumexError {
    #[error("{pos}: no token matches remaining input: {remaining:?}")]
    LexicalError { pos: usize, remaining: String },

    #[error("no production predicted for ({nonterminal}, {terminal}) at line {line}")]
    ParseMissingTable {
        nonterminal: String,
        terminal: String,
        line: usize,
    },

    #[error("expected {expected}, found {found} at line {line}")]
    ParseMismatch {
        expected: String,
        found: String,
        line: usize,
    },

    #[error("LL(1) conflict at table[{nonterminal}][{terminal}]:\n  {prod1}\n  {prod2}")]
    GrammarConflict {
        nonterminal: String,
        terminal: String,
        prod1: String,
        prod2: String,
    },

    #[error("nullable-propagation inconsistency for {nonterminal}: {detail}")]
    GrammarNullable { nonterminal: String, detail: String },

    #[error("action precondition violated in {action}: {detail}")]
    ActionError { action: String, detail: String },

    #[error("cannot convert lexeme '{lexeme}' to {kind}: {detail}")]
    ConversionError {
        lexeme: String,
        kind: String,
        detail: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for results in this crate.
pub type Result<T> = std::result::Result<T, LumexError>;

impl LumexError {
    /// The source line this error occurred at, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            LumexError::ParseMissingTable { line, .. } => Some(*line),
            LumexError::ParseMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}
