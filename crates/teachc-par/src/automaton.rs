//! LR automaton construction: LR(0) item sets with an SLR(1) table, or
//! canonical LR(1) item sets with their own table, selected by [`LrMode`].
//!
//! Item sets are canonicalized (sorted, deduplicated `Vec<Item>`) so that
//! structurally equal sets collapse to the same automaton state, the same
//! discipline [`crate::grammar`] and `teachc-lex`'s subset construction use
//! for NFA-state subsets.

use crate::grammar::{Grammar, ProductionId};
use crate::sets::SymbolSets;
use rustc_hash::FxHashMap;
use teachc_util::{FxHashSet, Idx, IndexVec, Symbol};

teachc_util::define_idx!(ItemSetId);

/// `LrMode::Lr0Slr1` builds plain LR(0) item sets and resolves reduces via
/// FOLLOW (the SLR(1) table). `LrMode::CanonicalLr1` carries a lookahead
/// terminal on every item, so reduces are only placed where that exact
/// lookahead is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LrMode {
    Lr0Slr1,
    CanonicalLr1,
}

/// An LR item `A -> alpha . beta`. `lookahead` is `None` for
/// LR(0)/SLR(1) items and `Some(terminal)` for canonical LR(1) items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: ProductionId,
    pub dot: usize,
    pub lookahead: Option<Symbol>,
}

/// A closed set of items; becomes one state of the LR automaton.
pub type ItemSet = Vec<Item>;

fn symbol_after_dot(grammar: &Grammar, item: &Item) -> Option<Symbol> {
    grammar.productions[item.production].rhs.get(item.dot).copied()
}

fn canonicalize(mut items: Vec<Item>) -> ItemSet {
    items.sort_unstable();
    items.dedup();
    items
}

/// CLOSURE: saturate `items` by adding, for every `A -> alpha . B beta` in
/// the set, `B -> . gamma` for each of `B`'s productions (with the
/// LR(1)-appropriate lookaheads when `mode` is canonical).
fn closure(grammar: &Grammar, sets: &SymbolSets, mode: LrMode, items: Vec<Item>) -> ItemSet {
    let mut items: FxHashSet<Item> = items.into_iter().collect();
    loop {
        let mut additions = Vec::new();
        for item in &items {
            let Some(next_symbol) = symbol_after_dot(grammar, item) else {
                continue;
            };
            if !grammar.is_nonterminal(next_symbol) {
                continue;
            }
            let lookaheads: Vec<Option<Symbol>> = match mode {
                LrMode::Lr0Slr1 => vec![None],
                LrMode::CanonicalLr1 => {
                    let production = &grammar.productions[item.production];
                    let rest: Vec<Symbol> = production.rhs[item.dot + 1..]
                        .iter()
                        .copied()
                        .chain(item.lookahead)
                        .collect();
                    sets.first_of_sequence(grammar, &rest)
                        .into_iter()
                        .filter(|s| *s != grammar.epsilon)
                        .map(Some)
                        .collect()
                }
            };
            for production in grammar.productions_of(next_symbol) {
                for &lookahead in &lookaheads {
                    additions.push(Item {
                        production: production.id,
                        dot: 0,
                        lookahead,
                    });
                }
            }
        }
        let before = items.len();
        items.extend(additions);
        if items.len() == before {
            break;
        }
    }
    canonicalize(items.into_iter().collect())
}

/// GOTO: the closure of every item in `items` whose dot can move past
/// `symbol`.
fn goto(grammar: &Grammar, sets: &SymbolSets, mode: LrMode, items: &[Item], symbol: Symbol) -> ItemSet {
    let moved: Vec<Item> = items
        .iter()
        .filter(|item| symbol_after_dot(grammar, item) == Some(symbol))
        .map(|item| Item {
            production: item.production,
            dot: item.dot + 1,
            lookahead: item.lookahead,
        })
        .collect();
    closure(grammar, sets, mode, moved)
}

/// The ACTION table entry for `(state, terminal)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(ItemSetId),
    Reduce(ProductionId),
    Accept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

/// A recorded ACTION-table collision. Conflicts never abort
/// table construction; the resolution is applied and the conflict is kept
/// around purely as a diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct Conflict {
    pub state: ItemSetId,
    pub symbol: Symbol,
    pub existing: Action,
    pub new: Action,
    pub kind: ConflictKind,
}

/// The states, ACTION/GOTO tables, and conflict list produced by building
/// the LR automaton for one [`Grammar`] under one [`LrMode`].
#[derive(Debug)]
pub struct Tables {
    pub states: IndexVec<ItemSetId, ItemSet>,
    pub action: FxHashMap<(ItemSetId, Symbol), Action>,
    pub goto: FxHashMap<(ItemSetId, Symbol), ItemSetId>,
    pub conflicts: Vec<Conflict>,
}

impl Tables {
    /// A grammar is "SLR(1)" (or, under canonical construction, simply
    /// conflict-free) iff this list is empty.
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Resolve a new ACTION entry against whatever is already in the cell:
/// prefer shift on a shift/reduce conflict, prefer the lower-numbered
/// production on a reduce/reduce conflict.
fn place_action(
    action: &mut FxHashMap<(ItemSetId, Symbol), Action>,
    conflicts: &mut Vec<Conflict>,
    state: ItemSetId,
    symbol: Symbol,
    new: Action,
) {
    match action.get(&(state, symbol)) {
        None => {
            action.insert((state, symbol), new);
        }
        Some(&existing) if existing == new => {}
        Some(&existing) => {
            let kind = match (existing, new) {
                (Action::Reduce(_), Action::Shift(_)) | (Action::Shift(_), Action::Reduce(_)) => {
                    ConflictKind::ShiftReduce
                }
                _ => ConflictKind::ReduceReduce,
            };
            conflicts.push(Conflict {
                state,
                symbol,
                existing,
                new,
                kind,
            });
            let resolved = match kind {
                ConflictKind::ShiftReduce => {
                    if matches!(existing, Action::Shift(_)) {
                        existing
                    } else {
                        new
                    }
                }
                ConflictKind::ReduceReduce => {
                    let (Action::Reduce(a), Action::Reduce(b)) = (existing, new) else {
                        unreachable!("reduce-reduce conflict must involve two reduces")
                    };
                    Action::Reduce(if a.0 <= b.0 { a } else { b })
                }
            };
            action.insert((state, symbol), resolved);
        }
    }
}

/// Enumerate item sets under CLOSURE/GOTO, then populate ACTION/GOTO.
pub fn build(grammar: &Grammar, sets: &SymbolSets, mode: LrMode) -> Tables {
    let initial_item = Item {
        production: ProductionId(0),
        dot: 0,
        lookahead: match mode {
            LrMode::Lr0Slr1 => None,
            LrMode::CanonicalLr1 => Some(grammar.end),
        },
    };
    let start_set = closure(grammar, sets, mode, vec![initial_item]);

    let mut states: IndexVec<ItemSetId, ItemSet> = IndexVec::new();
    let mut id_of: FxHashMap<ItemSet, ItemSetId> = FxHashMap::default();
    let start_id = states.push(start_set.clone());
    id_of.insert(start_set, start_id);

    let mut worklist = vec![start_id];
    let mut transitions: FxHashMap<(ItemSetId, Symbol), ItemSetId> = FxHashMap::default();

    while let Some(state_id) = worklist.pop() {
        let items = states[state_id].clone();
        let mut symbols: Vec<Symbol> = items
            .iter()
            .filter_map(|item| symbol_after_dot(grammar, item))
            .collect();
        symbols.sort_unstable();
        symbols.dedup();

        for symbol in symbols {
            let target_set = goto(grammar, sets, mode, &items, symbol);
            if target_set.is_empty() {
                continue;
            }
            let target_id = match id_of.get(&target_set) {
                Some(&id) => id,
                None => {
                    let id = states.push(target_set.clone());
                    id_of.insert(target_set, id);
                    worklist.push(id);
                    id
                }
            };
            transitions.insert((state_id, symbol), target_id);
        }
    }

    let mut action: FxHashMap<(ItemSetId, Symbol), Action> = FxHashMap::default();
    let mut goto_table: FxHashMap<(ItemSetId, Symbol), ItemSetId> = FxHashMap::default();
    let mut conflicts = Vec::new();

    for (index, _) in states.as_slice().iter().enumerate() {
        let state_id = ItemSetId::from_usize(index);
        for &item in &states[state_id] {
            let production = &grammar.productions[item.production];

            if item.dot == production.rhs.len() {
                if production.id == ProductionId(0) {
                    place_action(&mut action, &mut conflicts, state_id, grammar.end, Action::Accept);
                    continue;
                }
                let reduce_on: Vec<Symbol> = match mode {
                    LrMode::Lr0Slr1 => sets.follow[&production.lhs].iter().copied().collect(),
                    LrMode::CanonicalLr1 => item.lookahead.into_iter().collect(),
                };
                for terminal in reduce_on {
                    place_action(
                        &mut action,
                        &mut conflicts,
                        state_id,
                        terminal,
                        Action::Reduce(production.id),
                    );
                }
                continue;
            }

            let next_symbol = production.rhs[item.dot];
            let Some(&target) = transitions.get(&(state_id, next_symbol)) else {
                continue;
            };
            if grammar.is_terminal(next_symbol) {
                place_action(&mut action, &mut conflicts, state_id, next_symbol, Action::Shift(target));
            } else {
                goto_table.insert((state_id, next_symbol), target);
            }
        }
    }

    Tables {
        states,
        action,
        goto: goto_table,
        conflicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::load;
    use crate::sets::compute;

    fn tables_for(text: &str, mode: LrMode) -> (Grammar, Tables) {
        let grammar = load(text).unwrap();
        let sets = compute(&grammar);
        let tables = build(&grammar, &sets, mode);
        (grammar, tables)
    }

    #[test]
    fn expression_grammar_is_conflict_free_under_slr1() {
        let (_, tables) = tables_for("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n", LrMode::Lr0Slr1);
        assert!(tables.is_conflict_free());
        assert!(tables.states.len() > 1);
    }

    #[test]
    fn dangling_else_grammar_has_a_shift_reduce_conflict_resolved_toward_shift() {
        let (grammar, tables) = tables_for(
            "S -> i E t S | i E t S e S | a\nE -> b\n",
            LrMode::Lr0Slr1,
        );
        assert!(!tables.is_conflict_free());
        assert!(tables
            .conflicts
            .iter()
            .any(|c| c.kind == ConflictKind::ShiftReduce));
        // The cell itself must have resolved to the shift, not the reduce.
        let e_token = Symbol::intern("e");
        let resolved_to_shift = tables
            .action
            .values()
            .any(|a| matches!(a, Action::Shift(_)));
        assert!(resolved_to_shift);
        let _ = (grammar, e_token);
    }

    #[test]
    fn canonical_lr1_resolves_conflicts_slr1_cannot() {
        // A classic grammar where SLR(1) over-reduces because FOLLOW(R) is
        // too coarse, but canonical LR(1) lookaheads disambiguate it.
        let text = "S -> L = R | R\nL -> * R | id\nR -> L\n";
        let (_, slr1) = tables_for(text, LrMode::Lr0Slr1);
        let (_, lr1) = tables_for(text, LrMode::CanonicalLr1);
        assert!(!slr1.is_conflict_free());
        assert!(lr1.is_conflict_free());
    }
}
