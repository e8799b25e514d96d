//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! Implements the fixed-point algorithms from Aho et al., "Compilers:
//! Principles, Techniques, and Tools" (2nd Edition), section 4.4, adapted to
//! a grammar whose right-hand sides may carry embedded `Symbol::Action`
//! entries. Those entries are invisible here: [`Rhs::analysis_symbols`]
//! strips them before FIRST/FOLLOW ever see a production's RHS, so an
//! action placed between two real symbols has no effect on either set.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::token::TokenKind;
use std::collections::{HashMap, HashSet};

pub type FirstSets = HashMap<Symbol, HashSet<Symbol>>;
pub type FollowSets = HashMap<Symbol, HashSet<Symbol>>;

/// Computes the FIRST sets for every terminal and nonterminal in `grammar`.
///
/// - FIRST(terminal) = {terminal}
/// - FIRST(A) for `A -> X1 X2 ... Xn`: FIRST(X1) minus epsilon, and so on
///   through X2, X3, ... as long as the preceding symbols are nullable; if
///   every Xi is nullable, epsilon joins FIRST(A) too.
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = HashMap::new();

    for terminal in grammar.terminals() {
        let sym = Symbol::terminal(terminal);
        first_sets.insert(sym.clone(), HashSet::from([sym]));
    }
    first_sets.insert(
        Symbol::terminal(TokenKind::EndOfFile),
        HashSet::from([Symbol::terminal(TokenKind::EndOfFile)]),
    );
    first_sets.insert(Symbol::Epsilon, HashSet::from([Symbol::Epsilon]));

    for nonterminal in grammar.nonterminals() {
        first_sets.entry(nonterminal).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let lhs = &production.lhs;
            let current_first = first_sets.get(lhs).cloned().unwrap_or_default();

            let symbols: Vec<Symbol> = production
                .rhs
                .analysis_symbols()
                .into_iter()
                .cloned()
                .collect();
            let rhs_first = first_of_string(&first_sets, &symbols);

            let mut new_first = current_first.clone();
            new_first.extend(rhs_first);

            if new_first.len() != current_first.len() {
                first_sets.insert(lhs.clone(), new_first);
                changed = true;
            }
        }
    }

    first_sets
}

/// FIRST of a symbol sequence (already stripped of `Action` entries).
pub fn first_of_string(first_sets: &FirstSets, symbols: &[Symbol]) -> HashSet<Symbol> {
    let mut result = HashSet::new();
    let mut has_epsilon = true;

    for symbol in symbols {
        if !has_epsilon {
            break;
        }

        let first_sym = first_sets.get(symbol).cloned().unwrap_or_default();

        for sym in &first_sym {
            if !sym.is_epsilon() {
                result.insert(sym.clone());
            }
        }

        has_epsilon = first_sym.contains(&Symbol::Epsilon);
    }

    if has_epsilon {
        result.insert(Symbol::Epsilon);
    }

    result
}

/// Computes the FOLLOW sets for every nonterminal in `grammar`.
///
/// FOLLOW(start) is seeded with `EndOfFile` only implicitly, through the
/// grammar's own productions — lumex's `body -> function body EndOfFile()`
/// alternative threads `EndOfFile` directly after `body` in its own RHS, so
/// no separate augmentation step is needed or performed here.
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = HashMap::new();

    for nonterminal in grammar.nonterminals() {
        follow_sets.entry(nonterminal).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let lhs = &production.lhs;
            let symbols: Vec<Symbol> = production
                .rhs
                .analysis_symbols()
                .into_iter()
                .cloned()
                .collect();

            for (i, symbol) in symbols.iter().enumerate() {
                if !symbol.is_nonterminal() {
                    continue;
                }

                let current_follow = follow_sets.get(symbol).cloned().unwrap_or_default();
                let mut new_follow = current_follow.clone();

                let beta = &symbols[i + 1..];
                let first_beta = first_of_string(first_sets, beta);

                for sym in &first_beta {
                    if !sym.is_epsilon() {
                        new_follow.insert(sym.clone());
                    }
                }

                if beta.is_empty() || first_beta.contains(&Symbol::Epsilon) {
                    let follow_lhs = follow_sets.get(lhs).cloned().unwrap_or_default();
                    new_follow.extend(follow_lhs);
                }

                if new_follow.len() != current_follow.len() {
                    follow_sets.insert(symbol.clone(), new_follow);
                    changed = true;
                }
            }
        }
    }

    follow_sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rhs;

    fn toy_grammar() -> Grammar {
        // S -> A B
        // A -> a A | ε
        // B -> b
        let mut g = Grammar::new("S");
        let s = Symbol::nonterminal("S");
        let a = Symbol::nonterminal("A");
        let b = Symbol::nonterminal("B");
        g.append(s, Rhs::sequence([a.clone(), b.clone()]));
        g.append(
            a.clone(),
            Rhs::sequence([Symbol::terminal(TokenKind::Plus), a]),
        );
        g.append(Symbol::nonterminal("A"), Rhs::Epsilon);
        g.append(b, Rhs::sequence([Symbol::terminal(TokenKind::Minus)]));
        g
    }

    #[test]
    fn first_of_nullable_nonterminal_includes_epsilon() {
        let g = toy_grammar();
        let first = compute_first_sets(&g);
        let a_first = first.get(&Symbol::nonterminal("A")).unwrap();
        assert!(a_first.contains(&Symbol::terminal(TokenKind::Plus)));
        assert!(a_first.contains(&Symbol::Epsilon));
    }

    #[test]
    fn follow_propagates_through_nullable_prefix() {
        let g = toy_grammar();
        let first = compute_first_sets(&g);
        let follow = compute_follow_sets(&g, &first);
        let a_follow = follow.get(&Symbol::nonterminal("A")).unwrap();
        assert!(a_follow.contains(&Symbol::terminal(TokenKind::Plus)));
        assert!(a_follow.contains(&Symbol::terminal(TokenKind::Minus)));
    }

    #[test]
    fn action_symbols_do_not_affect_first_or_follow() {
        let mut g = Grammar::new("S");
        let s = Symbol::nonterminal("S");
        g.append(
            s.clone(),
            Rhs::sequence([
                Symbol::action("BeforeS"),
                Symbol::terminal(TokenKind::Plus),
                Symbol::action("AfterPlus"),
            ]),
        );
        let first = compute_first_sets(&g);
        let s_first = first.get(&s).unwrap();
        assert_eq!(s_first.len(), 1);
        assert!(s_first.contains(&Symbol::terminal(TokenKind::Plus)));
    }
}
