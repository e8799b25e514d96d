//! LL(1) analysis (C5): SELECT sets and the predictive parse table.
//!
//! Built on top of [`crate::first_follow`]'s FIRST/FOLLOW fixed points.
//! SELECT sets are kept addressable by production id (not folded directly
//! into the table) so diagnostics and tests can inspect which terminals
//! select a given alternative independently of table construction.

use crate::error::{LumexError, Result};
use crate::first_follow::{compute_first_sets, compute_follow_sets, first_of_string, FirstSets, FollowSets};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// SELECT sets, keyed by production id.
pub type SelectSets = HashMap<u32, HashSet<Symbol>>;

/// Predictive parse table: `table[(nonterminal, terminal)] = production id`.
pub type Table = HashMap<(Symbol, Symbol), u32>;

/// The product of LL(1) analysis: FIRST/FOLLOW/SELECT sets and the
/// predictive table, plus the grammar they were computed from.
pub struct Analysis {
    pub grammar: Grammar,
    pub first_sets: FirstSets,
    pub follow_sets: FollowSets,
    pub select_sets: SelectSets,
    pub table: Table,
}

impl Analysis {
    /// Runs FIRST, FOLLOW, SELECT and table construction over `grammar`,
    /// failing with [`LumexError::GrammarConflict`] on the first cell that
    /// would receive two productions — the grammar is not LL(1).
    pub fn build(grammar: Grammar) -> Result<Self> {
        let first_sets = compute_first_sets(&grammar);
        let follow_sets = compute_follow_sets(&grammar, &first_sets);
        let select_sets = compute_select_sets(&grammar, &first_sets, &follow_sets);
        let table = build_table(&grammar, &select_sets)?;

        Ok(Self {
            grammar,
            first_sets,
            follow_sets,
            select_sets,
            table,
        })
    }

    /// Looks up the production predicted for `(nonterminal, terminal)`.
    pub fn predict(&self, nonterminal: &Symbol, terminal: &Symbol) -> Option<&Production> {
        let id = self.table.get(&(nonterminal.clone(), terminal.clone()))?;
        self.grammar.productions().iter().find(|p| p.id == *id)
    }
}

/// Computes SELECT(p) for every production p:
///
/// - If p's RHS is epsilon: SELECT(p) = FOLLOW(lhs).
/// - Otherwise: SELECT(p) = FIRST(rhs) - {ε}, plus FOLLOW(lhs) if ε ∈
///   FIRST(rhs) (the whole RHS is nullable).
pub fn compute_select_sets(grammar: &Grammar, first_sets: &FirstSets, follow_sets: &FollowSets) -> SelectSets {
    let mut select_sets: SelectSets = HashMap::new();

    for production in grammar.productions() {
        let lhs = &production.lhs;
        let follow_lhs = follow_sets.get(lhs).cloned().unwrap_or_default();

        let mut select = HashSet::new();

        if production.rhs.is_epsilon() {
            select.extend(follow_lhs);
        } else {
            let symbols: Vec<Symbol> = production
                .rhs
                .analysis_symbols()
                .into_iter()
                .cloned()
                .collect();
            let first_rhs = first_of_string(first_sets, &symbols);

            for sym in &first_rhs {
                if !sym.is_epsilon() {
                    select.insert(sym.clone());
                }
            }
            if first_rhs.contains(&Symbol::Epsilon) {
                select.extend(follow_lhs);
            }
        }

        select_sets.insert(production.id, select);
    }

    select_sets
}

/// Builds the predictive table from SELECT sets, returning a
/// [`LumexError::GrammarConflict`] on the first cell that two productions
/// both claim.
pub fn build_table(grammar: &Grammar, select_sets: &SelectSets) -> Result<Table> {
    let mut table: Table = HashMap::new();
    let mut filled_by: HashMap<(Symbol, Symbol), &Production> = HashMap::new();

    for production in grammar.productions() {
        let lhs = &production.lhs;
        let select = select_sets.get(&production.id).cloned().unwrap_or_default();

        for terminal in &select {
            let key = (lhs.clone(), terminal.clone());
            if let Some(existing) = filled_by.get(&key) {
                return Err(LumexError::GrammarConflict {
                    nonterminal: lhs.to_string(),
                    terminal: terminal.to_string(),
                    prod1: existing.to_string(),
                    prod2: production.to_string(),
                });
            }
            filled_by.insert(key.clone(), production);
            table.insert(key, production.id);
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rhs;
    use crate::token::TokenKind;

    fn toy_grammar() -> Grammar {
        // S -> A B
        // A -> + A | ε
        // B -> -
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
    fn select_sets_cover_nullable_alternative_via_follow() {
        let g = toy_grammar();
        let analysis = Analysis::build(g).unwrap();
        let eps_id = analysis
            .grammar
            .productions()
            .iter()
            .find(|p| p.rhs.is_epsilon())
            .unwrap()
            .id;
        let select = analysis.select_sets.get(&eps_id).unwrap();
        assert!(select.contains(&Symbol::terminal(TokenKind::Minus)));
    }

    #[test]
    fn table_predicts_correct_production_on_first_terminal() {
        let g = toy_grammar();
        let analysis = Analysis::build(g).unwrap();
        let a = Symbol::nonterminal("A");
        let prod = analysis
            .predict(&a, &Symbol::terminal(TokenKind::Plus))
            .unwrap();
        assert!(!prod.rhs.is_epsilon());
    }

    #[test]
    fn ambiguous_grammar_reports_conflict() {
        let mut g = Grammar::new("S");
        let s = Symbol::nonterminal("S");
        g.append(s.clone(), Rhs::sequence([Symbol::terminal(TokenKind::Plus)]));
        g.append(s, Rhs::sequence([Symbol::terminal(TokenKind::Plus)]));
        let err = Analysis::build(g).unwrap_err();
        assert!(matches!(err, LumexError::GrammarConflict { .. }));
    }
}
