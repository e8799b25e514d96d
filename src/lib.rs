//! lumex — source-to-source translator from a Lumerical-style scene
//! scripting dialect to a meep-driving Python target script.
//!
//! The library crate exposes the full pipeline (lexer, grammar, LL(1)
//! analyzer, parser, actions, AST, emission) independently of the CLI
//! binary, so each stage is directly testable.

pub mod actions;
pub mod analyzer;
pub mod ast;
pub mod cli;
pub mod emit;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod lexer;
pub mod lumex_grammar;
pub mod parser;
pub mod selector;
pub mod symbol;
pub mod token;

// Re-export commonly used types
pub use analyzer::Analysis;
pub use ast::ASTNode;
pub use error::{LumexError, Result};
pub use grammar::{Grammar, Production};
pub use lexer::Lexer;
pub use parser::Parser;
pub use symbol::Symbol;
pub use token::{Token, TokenKind};
