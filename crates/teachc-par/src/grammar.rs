//! Grammar loader: turns `LHS -> rhs1 | rhs2 | ... | rhsN` text into a
//! [`Grammar`] of [`Production`]s, augmented with a fresh start production
//! `S' -> S`.
//!
//! Terminals and nonterminals are never declared separately: a symbol is a
//! nonterminal iff it appears as some production's lhs, and a terminal
//! otherwise. The arrow may be spelled `->` or `\u{2192}`; `#`
//! starts a comment; `\u{3b5}` or an empty right-hand side denotes the empty
//! production.

use crate::error::GrammarError;
use rustc_hash::FxHashSet;
use teachc_util::{Idx, IndexVec, Symbol};

teachc_util::define_idx!(ProductionId);

/// `(lhs, rhs, id)` — one grammar production. An empty `rhs` is an
/// epsilon production.
#[derive(Debug, Clone)]
pub struct Production {
    pub id: ProductionId,
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

#[derive(Debug)]
pub struct Grammar {
    /// The declared start symbol (before augmentation).
    pub start: Symbol,
    /// The fresh `S'` added by the loader; `S' -> start` is production 0.
    pub augmented_start: Symbol,
    pub epsilon: Symbol,
    /// End-of-input sentinel `\u{22a3}`, always a member of `terminals`.
    pub end: Symbol,
    pub nonterminals: FxHashSet<Symbol>,
    pub terminals: FxHashSet<Symbol>,
    pub productions: IndexVec<ProductionId, Production>,
}

impl Grammar {
    pub fn is_nonterminal(&self, symbol: Symbol) -> bool {
        self.nonterminals.contains(&symbol)
    }

    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        self.terminals.contains(&symbol)
    }

    pub fn productions_of(&self, lhs: Symbol) -> impl Iterator<Item = &Production> {
        self.productions.as_slice().iter().filter(move |p| p.lhs == lhs)
    }
}

/// Split a line on its first `->` or `\u{2192}` arrow. `None` if neither is present.
fn split_arrow(line: &str) -> Option<(&str, &str)> {
    if let Some(idx) = line.find("->") {
        Some((&line[..idx], &line[idx + 2..]))
    } else if let Some(idx) = line.find('\u{2192}') {
        Some((&line[..idx], &line[idx + '\u{2192}'.len_utf8()..]))
    } else {
        None
    }
}

/// Parse `text` into an augmented [`Grammar`]. Fails the whole build on the
/// first malformed line, undeclared `%start` target, or duplicate `%start`.
pub fn load(text: &str) -> Result<Grammar, GrammarError> {
    let epsilon = Symbol::intern("\u{3b5}");
    let end = Symbol::intern("\u{22a3}");

    let mut explicit_start: Option<(usize, Symbol)> = None;
    let mut raw_productions: Vec<(Symbol, Vec<Symbol>)> = Vec::new();
    let mut lhs_order: Vec<Symbol> = Vec::new();
    let mut nonterminals: FxHashSet<Symbol> = FxHashSet::default();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("%start") {
            let name = rest.trim();
            if name.is_empty() {
                return Err(GrammarError::MalformedLine {
                    line,
                    text: raw_line.to_string(),
                });
            }
            if explicit_start.is_some() {
                return Err(GrammarError::MultipleStarts { line });
            }
            explicit_start = Some((line, Symbol::intern(name)));
            continue;
        }

        let Some((lhs_text, rhs_text)) = split_arrow(trimmed) else {
            return Err(GrammarError::MalformedLine {
                line,
                text: raw_line.to_string(),
            });
        };
        let lhs_text = lhs_text.trim();
        if lhs_text.is_empty() {
            return Err(GrammarError::MalformedLine {
                line,
                text: raw_line.to_string(),
            });
        }
        let lhs = Symbol::intern(lhs_text);
        if nonterminals.insert(lhs) {
            lhs_order.push(lhs);
        }

        for alt in rhs_text.split('|') {
            let alt = alt.trim();
            let rhs: Vec<Symbol> = if alt.is_empty() || alt == "\u{3b5}" {
                Vec::new()
            } else {
                alt.split_whitespace().map(Symbol::intern).collect()
            };
            raw_productions.push((lhs, rhs));
        }
    }

    if lhs_order.is_empty() {
        return Err(GrammarError::Empty);
    }

    let start = match explicit_start {
        Some((line, symbol)) => {
            if !nonterminals.contains(&symbol) {
                return Err(GrammarError::UndeclaredSymbol {
                    line,
                    symbol: symbol.as_str().to_string(),
                });
            }
            symbol
        }
        None => lhs_order[0],
    };

    let mut terminals: FxHashSet<Symbol> = FxHashSet::default();
    for (_, rhs) in &raw_productions {
        for symbol in rhs {
            if !nonterminals.contains(symbol) {
                terminals.insert(*symbol);
            }
        }
    }
    terminals.insert(end);

    let mut augmented_text = format!("{}'", start.as_str());
    while nonterminals.contains(&Symbol::intern(&augmented_text)) {
        augmented_text.push('\'');
    }
    let augmented_start = Symbol::intern(&augmented_text);
    nonterminals.insert(augmented_start);

    let mut productions: IndexVec<ProductionId, Production> = IndexVec::new();
    let augmented_id = ProductionId::from_usize(productions.len());
    productions.push(Production {
        id: augmented_id,
        lhs: augmented_start,
        rhs: vec![start],
    });
    for (lhs, rhs) in raw_productions {
        let id = ProductionId::from_usize(productions.len());
        productions.push(Production { id, lhs, rhs });
    }

    Ok(Grammar {
        start,
        augmented_start,
        epsilon,
        end,
        nonterminals,
        terminals,
        productions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_expression_grammar_with_augmented_start() {
        let grammar = load("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n").unwrap();
        assert_eq!(grammar.start.as_str(), "E");
        assert_eq!(grammar.augmented_start.as_str(), "E'");
        assert!(grammar.is_nonterminal(Symbol::intern("E")));
        assert!(grammar.is_nonterminal(Symbol::intern("T")));
        assert!(grammar.is_terminal(Symbol::intern("id")));
        assert!(grammar.is_terminal(Symbol::intern("+")));
        // 6 rules from the text plus the augmented S' -> E production.
        assert_eq!(grammar.productions.len(), 7);
        assert_eq!(grammar.productions[ProductionId(0)].lhs, grammar.augmented_start);
    }

    #[test]
    fn empty_rhs_and_epsilon_token_both_produce_empty_production() {
        let grammar = load("A -> a A |\nB -> \u{3b5}\n").unwrap();
        let a_rules: Vec<_> = grammar.productions_of(Symbol::intern("A")).collect();
        assert!(a_rules.iter().any(|p| p.is_epsilon()));
        let b_rules: Vec<_> = grammar.productions_of(Symbol::intern("B")).collect();
        assert!(b_rules[0].is_epsilon());
    }

    #[test]
    fn explicit_start_directive_overrides_first_head() {
        let grammar = load("%start B\nA -> a\nB -> b A\n").unwrap();
        assert_eq!(grammar.start.as_str(), "B");
    }

    #[test]
    fn undeclared_start_symbol_is_an_error() {
        let err = load("%start Z\nA -> a\n").unwrap_err();
        assert_eq!(
            err,
            GrammarError::UndeclaredSymbol {
                line: 1,
                symbol: "Z".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_start_directive_is_an_error() {
        let err = load("%start A\n%start A\nA -> a\n").unwrap_err();
        assert_eq!(err, GrammarError::MultipleStarts { line: 2 });
    }

    #[test]
    fn line_without_an_arrow_is_malformed() {
        let err = load("A b c\n").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedLine { line: 1, .. }));
    }
}
