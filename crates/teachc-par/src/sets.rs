//! FIRST/FOLLOW computation: fixed-point iteration over a [`Grammar`]'s
//! productions, consumed by the LR automaton builder for SLR(1) reduce
//! placement and LR(1) closure.

use crate::grammar::Grammar;
use rustc_hash::FxHashMap;
use teachc_util::{FxHashSet, Symbol};

/// FIRST and FOLLOW sets for every symbol of a [`Grammar`]. `first` is
/// indexed by terminal *and* nonterminal; a nonterminal's set contains
/// `grammar.epsilon` iff the nonterminal is nullable. `follow` is indexed by
/// nonterminal only.
#[derive(Debug)]
pub struct SymbolSets {
    pub first: FxHashMap<Symbol, FxHashSet<Symbol>>,
    pub follow: FxHashMap<Symbol, FxHashSet<Symbol>>,
}

impl SymbolSets {
    /// FIRST of a whole rhs sequence: FIRST(Y1) union, while Y1 is nullable,
    /// the FIRST of the rest — FIRST(empty sequence) = {epsilon}.
    pub fn first_of_sequence(&self, grammar: &Grammar, seq: &[Symbol]) -> FxHashSet<Symbol> {
        let mut out = FxHashSet::default();
        let mut all_nullable = true;
        for symbol in seq {
            let first_of_symbol = &self.first[symbol];
            out.extend(first_of_symbol.iter().filter(|s| **s != grammar.epsilon).copied());
            if !first_of_symbol.contains(&grammar.epsilon) {
                all_nullable = false;
                break;
            }
        }
        if all_nullable {
            out.insert(grammar.epsilon);
        }
        out
    }
}

/// Compute FIRST and FOLLOW to saturation. Each is a
/// monotonically growing fixed point: terminating when one more pass over
/// every production changes nothing.
pub fn compute(grammar: &Grammar) -> SymbolSets {
    let mut first: FxHashMap<Symbol, FxHashSet<Symbol>> = FxHashMap::default();
    for &terminal in &grammar.terminals {
        first.entry(terminal).or_default().insert(terminal);
    }
    for &nonterminal in &grammar.nonterminals {
        first.entry(nonterminal).or_default();
    }

    loop {
        let mut changed = false;
        for production in grammar.productions.as_slice() {
            if production.is_epsilon() {
                changed |= first.get_mut(&production.lhs).unwrap().insert(grammar.epsilon);
                continue;
            }
            let mut all_nullable = true;
            for &symbol in &production.rhs {
                let addition: Vec<Symbol> = first[&symbol]
                    .iter()
                    .filter(|s| **s != grammar.epsilon)
                    .copied()
                    .collect();
                let lhs_first = first.get_mut(&production.lhs).unwrap();
                for item in addition {
                    changed |= lhs_first.insert(item);
                }
                if !first[&symbol].contains(&grammar.epsilon) {
                    all_nullable = false;
                    break;
                }
            }
            if all_nullable {
                changed |= first.get_mut(&production.lhs).unwrap().insert(grammar.epsilon);
            }
        }
        if !changed {
            break;
        }
    }

    let mut follow: FxHashMap<Symbol, FxHashSet<Symbol>> = FxHashMap::default();
    for &nonterminal in &grammar.nonterminals {
        follow.entry(nonterminal).or_default();
    }
    follow.get_mut(&grammar.augmented_start).unwrap().insert(grammar.end);

    let sets_snapshot = SymbolSets {
        first: first.clone(),
        follow: FxHashMap::default(),
    };

    loop {
        let mut changed = false;
        for production in grammar.productions.as_slice() {
            for (index, &symbol) in production.rhs.iter().enumerate() {
                if !grammar.is_nonterminal(symbol) {
                    continue;
                }
                let beta = &production.rhs[index + 1..];
                let first_beta = sets_snapshot.first_of_sequence(grammar, beta);
                let beta_follow = follow.get_mut(&symbol).unwrap();
                for terminal in first_beta.iter().filter(|s| **s != grammar.epsilon) {
                    changed |= beta_follow.insert(*terminal);
                }
                if first_beta.contains(&grammar.epsilon) || beta.is_empty() {
                    let lhs_follow: Vec<Symbol> = follow[&production.lhs].iter().copied().collect();
                    let symbol_follow = follow.get_mut(&symbol).unwrap();
                    for terminal in lhs_follow {
                        changed |= symbol_follow.insert(terminal);
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    SymbolSets { first, follow }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::load;

    #[test]
    fn first_follow_of_classic_expression_grammar() {
        let grammar = load("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n").unwrap();
        let sets = compute(&grammar);

        let id = Symbol::intern("id");
        let lparen = Symbol::intern("(");
        let e = Symbol::intern("E");
        let t = Symbol::intern("T");
        let f = Symbol::intern("F");

        assert_eq!(sets.first[&e].len(), 2);
        assert!(sets.first[&e].contains(&id));
        assert!(sets.first[&e].contains(&lparen));
        assert_eq!(sets.first[&t], sets.first[&e]);
        assert_eq!(sets.first[&f], sets.first[&e]);

        let plus = Symbol::intern("+");
        let star = Symbol::intern("*");
        let rparen = Symbol::intern(")");
        assert!(sets.follow[&e].contains(&plus));
        assert!(sets.follow[&e].contains(&rparen));
        assert!(sets.follow[&e].contains(&grammar.end));
        assert!(sets.follow[&t].contains(&plus));
        assert!(sets.follow[&t].contains(&star));
        assert!(sets.follow[&f].contains(&star));
    }

    #[test]
    fn one_additional_iteration_changes_nothing() {
        let grammar = load("S -> A B\nA -> a | \u{3b5}\nB -> b\n").unwrap();
        let first_pass = compute(&grammar);
        let second_pass = compute(&grammar);
        assert_eq!(first_pass.first, second_pass.first);
        assert_eq!(first_pass.follow, second_pass.follow);
    }
}
