//! Unit tests for FIRST/FOLLOW set computation, exercised against a small
//! toy grammar (the lumex grammar itself is covered by
//! `lumex_grammar.rs`'s own embedded `grammar_is_ll1` check).

use lumex::first_follow::{compute_first_sets, compute_follow_sets, first_of_string};
use lumex::grammar::{Grammar, Rhs};
use lumex::symbol::Symbol;
use lumex::token::TokenKind;

fn toy_grammar() -> Grammar {
    // S -> A B
    // A -> + A | ε
    // B -> -
    let mut g = Grammar::new("S");
    let a = Symbol::nonterminal("A");
    let b = Symbol::nonterminal("B");
    g.append(Symbol::nonterminal("S"), Rhs::sequence([a.clone(), b.clone()]));
    g.append(a.clone(), Rhs::sequence([Symbol::terminal(TokenKind::Plus), a.clone()]));
    g.append(a, Rhs::Epsilon);
    g.append(b, Rhs::sequence([Symbol::terminal(TokenKind::Minus)]));
    g
}

#[test]
fn first_of_start_symbol_covers_both_branches() {
    let g = toy_grammar();
    let first = compute_first_sets(&g);
    let s_first = first.get(&Symbol::nonterminal("S")).unwrap();
    assert!(s_first.contains(&Symbol::terminal(TokenKind::Plus)));
    assert!(s_first.contains(&Symbol::terminal(TokenKind::Minus)));
}

#[test]
fn first_of_string_short_circuits_on_first_non_nullable_symbol() {
    let g = toy_grammar();
    let first = compute_first_sets(&g);
    let symbols = vec![Symbol::nonterminal("B"), Symbol::nonterminal("A")];
    let result = first_of_string(&first, &symbols);
    assert_eq!(result, std::collections::HashSet::from([Symbol::terminal(TokenKind::Minus)]));
}

#[test]
fn follow_of_start_symbol_is_empty_without_explicit_eof_production() {
    let g = toy_grammar();
    let first = compute_first_sets(&g);
    let follow = compute_follow_sets(&g, &first);
    let s_follow = follow.get(&Symbol::nonterminal("S")).unwrap();
    assert!(s_follow.is_empty());
}

#[test]
fn follow_of_b_is_empty_when_nothing_follows_it() {
    let g = toy_grammar();
    let first = compute_first_sets(&g);
    let follow = compute_follow_sets(&g, &first);
    let b_follow = follow.get(&Symbol::nonterminal("B")).unwrap();
    assert!(b_follow.is_empty());
}
