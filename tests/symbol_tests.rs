//! Unit tests for the symbol module

use lumex::symbol::Symbol;
use lumex::token::TokenKind;

#[test]
fn terminal_nonterminal_action_are_distinguishable() {
    let t = Symbol::terminal(TokenKind::Identifier);
    let n = Symbol::nonterminal("statement");
    let a = Symbol::action("StoreToBody");

    assert!(t.is_terminal());
    assert!(!t.is_nonterminal());
    assert!(n.is_nonterminal());
    assert!(!n.is_terminal());
    assert!(a.is_action());
    assert!(!a.is_terminal());
    assert!(!a.is_nonterminal());
}

#[test]
fn action_equality_is_by_name_only() {
    assert_eq!(Symbol::action("If"), Symbol::action("If"));
    assert_ne!(Symbol::action("If"), Symbol::action("HandleElse"));
}

#[test]
fn epsilon_is_its_own_kind() {
    let e = Symbol::Epsilon;
    assert!(e.is_epsilon());
    assert!(!e.is_terminal());
    assert!(!e.is_nonterminal());
    assert!(!e.is_action());
}

#[test]
fn display_marks_actions_and_epsilon_distinctly() {
    assert_eq!(Symbol::action("If").to_string(), "@If");
    assert_eq!(Symbol::Epsilon.to_string(), "\u{03b5}");
}
