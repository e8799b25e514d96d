//! Parser driver (C8): the table-driven stack machine that turns a token
//! stream into an [`ASTNode`].
//!
//! Three stacks move in lockstep: the parse stack carries grammar symbols
//! (terminals, nonterminals, embedded actions), the value stack carries
//! `ASTNode`s built so far, and the token stack carries the literal tokens
//! actions consume (e.g. `StoreLiteral` reading back the lexeme it should
//! convert). Only shifting a terminal pushes onto the token stack; only an
//! action ever reads or writes the value stack.

use crate::actions::{self, Action};
use crate::analyzer::Analysis;
use crate::ast::ASTNode;
use crate::error::{LumexError, Result};
use crate::grammar::Rhs;
use crate::lexer::Lexer;
use crate::symbol::Symbol;
use crate::token::{Token, TokenKind};
use log::info;
use std::collections::HashMap;

/// Drives a single [`Analysis`] (grammar + predictive table) over arbitrary
/// source text, reusing the same action registry across calls.
pub struct Parser<'a> {
    analysis: &'a Analysis,
    actions: HashMap<String, Box<dyn Action>>,
}

impl<'a> Parser<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            analysis,
            actions: actions::registry(),
        }
    }

    /// Parses `source` to completion, returning the root `Module` node.
    ///
    /// The value stack is seeded with an empty `Module` before the grammar's
    /// start symbol runs — every top-level `StoreToBody` call (the grammar's
    /// own, and the ones `Imports` invokes internally) expects a parent
    /// already in place to append into.
    pub fn parse(&self, source: &str) -> Result<ASTNode> {
        let mut tokens = Lexer::new(source).tokens();
        let mut current = tokens
            .next()
            .expect("lexer token stream never ends")?;

        let mut parse_stack: Vec<Symbol> = vec![self.analysis.grammar.start_symbol().clone()];
        let mut value_stack: Vec<ASTNode> = vec![ASTNode::Module { body: Vec::new() }];
        let mut token_stack: Vec<Token> = Vec::new();

        while let Some(top) = parse_stack.pop() {
            match top {
                Symbol::Epsilon => {}

                Symbol::Action(name) => {
                    let action = self.actions.get(&name).ok_or_else(|| LumexError::ActionError {
                        action: name.clone(),
                        detail: "action not registered".to_string(),
                    })?;
                    info!("running action {}", action.name());
                    action.call(&mut value_stack, &mut token_stack)?;
                }

                Symbol::Terminal(kind) => {
                    if kind == current.kind {
                        info!("shift {:?} {:?} (line {})", kind, current.lexeme, current.line);
                        token_stack.push(current.clone());
                        current = tokens.next().expect("lexer token stream never ends")?;
                    } else {
                        return Err(LumexError::ParseMismatch {
                            expected: kind.to_string(),
                            found: current.kind.to_string(),
                            line: current.line,
                        });
                    }
                }

                Symbol::NonTerminal(ref name) => {
                    let terminal = Symbol::terminal(current.kind);
                    let production = self.analysis.predict(&top, &terminal).ok_or_else(|| {
                        LumexError::ParseMissingTable {
                            nonterminal: name.clone(),
                            terminal: terminal.to_string(),
                            line: current.line,
                        }
                    })?;
                    info!("predict {}", production);
                    if let Rhs::Sequence(symbols) = &production.rhs {
                        for symbol in symbols.iter().rev() {
                            parse_stack.push(symbol.clone());
                        }
                    }
                }
            }
        }

        if current.kind != TokenKind::EndOfFile {
            return Err(LumexError::ParseMismatch {
                expected: TokenKind::EndOfFile.to_string(),
                found: current.kind.to_string(),
                line: current.line,
            });
        }

        value_stack.pop().ok_or_else(|| LumexError::ActionError {
            action: "Parser".to_string(),
            detail: "value stack empty at end of parse".to_string(),
        })
    }
}
