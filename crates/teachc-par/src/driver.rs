//! LR driver: executes the ACTION/GOTO tables built by
//! [`crate::automaton`] over a token stream, synthesizing an AST in the
//! reduce step and recording a full trace of every shift, reduce,
//! accept, and error.

use crate::ast::{Ast, AstNode, AstNodeId};
use crate::automaton::{Action, ItemSetId, Tables};
use crate::error::ParseError;
use crate::grammar::{Grammar, ProductionId};
use crate::sets::SymbolSets;
use teachc_lex::{Token, TokenKind};
use teachc_util::{IndexVec, Symbol};

/// The terminal symbol name a grammar file would use for `token`. Keyword,
/// operator, and delimiter tokens are named by their own lexeme (`"if"`,
/// `"+"`, `"("`); identifier and literal tokens are named generically
/// (`"id"`, `"number"`, `"string"`, `"char"`), matching the terminal names
/// a grammar file's own terminal names.
pub fn terminal_for(token: &Token) -> Symbol {
    match token.kind {
        TokenKind::Identifier => Symbol::intern("id"),
        TokenKind::LiteralInt | TokenKind::LiteralFloat => Symbol::intern("number"),
        TokenKind::LiteralString => Symbol::intern("string"),
        TokenKind::LiteralChar => Symbol::intern("char"),
        TokenKind::Eof => Symbol::intern("\u{22a3}"),
        _ => Symbol::intern(token.lexeme.as_str()),
    }
}

/// One step of the trace: a snapshot of the stack and
/// remaining input immediately before `action` was taken.
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub index: usize,
    pub stack_states: Vec<ItemSetId>,
    pub stack_symbols: Vec<Symbol>,
    pub remaining_input: String,
    pub action: StepAction,
}

#[derive(Debug, Clone)]
pub enum StepAction {
    Shift(ItemSetId),
    Reduce(ProductionId),
    Accept,
    Error,
}

#[derive(Debug)]
pub struct ParseOutcome {
    pub trace: Vec<TraceStep>,
    pub ast: Option<Ast>,
    pub errors: Vec<ParseError>,
}

struct Frame {
    state: ItemSetId,
    symbol: Symbol,
    node: Option<AstNodeId>,
}

/// Run the table-driven interpreter over `tokens` (must already end in
/// exactly one EOF token, as [`teachc_lex::LexerDriver::scan`] guarantees).
pub fn parse(tokens: &[Token], grammar: &Grammar, sets: &SymbolSets, tables: &Tables) -> ParseOutcome {
    let mut nodes: IndexVec<AstNodeId, AstNode> = IndexVec::new();
    let mut stack = vec![Frame {
        state: ItemSetId(0),
        symbol: grammar.end,
        node: None,
    }];
    let mut pos = 0usize;
    let mut trace = Vec::new();
    let mut errors = Vec::new();
    let mut step = 0usize;

    loop {
        let state = stack.last().unwrap().state;
        let token = &tokens[pos.min(tokens.len() - 1)];
        let terminal = terminal_for(token);

        let stack_states: Vec<ItemSetId> = stack.iter().map(|f| f.state).collect();
        let stack_symbols: Vec<Symbol> = stack.iter().map(|f| f.symbol).collect();
        let remaining_input = tokens[pos.min(tokens.len())..]
            .iter()
            .map(|t| t.lexeme.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        match tables.action.get(&(state, terminal)).copied() {
            Some(Action::Shift(next)) => {
                let node = nodes.push(AstNode::leaf(terminal, token.lexeme.clone()));
                stack.push(Frame {
                    state: next,
                    symbol: terminal,
                    node: Some(node),
                });
                pos += 1;
                trace.push(TraceStep {
                    index: step,
                    stack_states,
                    stack_symbols,
                    remaining_input,
                    action: StepAction::Shift(next),
                });
            }
            Some(Action::Reduce(production_id)) => {
                let production = &grammar.productions[production_id];
                let arity = production.rhs.len();
                let mut children = Vec::with_capacity(arity);
                for _ in 0..arity {
                    if let Some(node) = stack.pop().unwrap().node {
                        children.push(node);
                    }
                }
                children.reverse();
                let resume_state = stack.last().unwrap().state;
                let goto_state = *tables
                    .goto
                    .get(&(resume_state, production.lhs))
                    .expect("a reduce action always has a matching GOTO entry");
                let node = nodes.push(AstNode::internal(production.lhs, production_id, children));
                stack.push(Frame {
                    state: goto_state,
                    symbol: production.lhs,
                    node: Some(node),
                });
                trace.push(TraceStep {
                    index: step,
                    stack_states,
                    stack_symbols,
                    remaining_input,
                    action: StepAction::Reduce(production_id),
                });
            }
            Some(Action::Accept) => {
                trace.push(TraceStep {
                    index: step,
                    stack_states,
                    stack_symbols,
                    remaining_input,
                    action: StepAction::Accept,
                });
                let root = stack.pop().and_then(|f| f.node);
                let mut ast = root.map(|root| Ast { nodes, root });
                if let Some(ast) = ast.as_mut() {
                    crate::ast::collapse_chains(ast);
                }
                return ParseOutcome { trace, ast, errors };
            }
            None => {
                trace.push(TraceStep {
                    index: step,
                    stack_states: stack_states.clone(),
                    stack_symbols: stack_symbols.clone(),
                    remaining_input: remaining_input.clone(),
                    action: StepAction::Error,
                });

                let expected: Vec<String> = tables
                    .action
                    .keys()
                    .filter(|(s, _)| *s == state)
                    .map(|(_, sym)| sym.as_str().to_string())
                    .collect();
                let recovered = recover(&mut stack, &mut pos, tokens, sets, tables, &mut nodes);
                errors.push(ParseError {
                    line: token.line,
                    column: token.column,
                    found: token.lexeme.clone(),
                    expected,
                    recovered,
                });
                if !recovered {
                    return ParseOutcome {
                        trace,
                        ast: None,
                        errors,
                    };
                }
            }
        }
        step += 1;
    }
}

/// Panic-mode recovery: pop states until one's GOTO contains a
/// nonterminal `A` for which `ACTION[GOTO[state, A], current-lookahead]` is
/// defined, skip input until a token in FOLLOW(A), then push `(GOTO[state,
/// A], A, error-placeholder)` and resume. `false` if no such state exists.
fn recover(
    stack: &mut Vec<Frame>,
    pos: &mut usize,
    tokens: &[Token],
    sets: &SymbolSets,
    tables: &Tables,
    nodes: &mut IndexVec<AstNodeId, AstNode>,
) -> bool {
    if *pos >= tokens.len() {
        return false;
    }
    let current_terminal = terminal_for(&tokens[*pos]);

    for depth in (0..stack.len()).rev() {
        let state = stack[depth].state;
        let mut candidates: Vec<(Symbol, ItemSetId)> = tables
            .goto
            .iter()
            .filter(|((s, _), _)| *s == state)
            .map(|((_, a), &target)| (*a, target))
            .collect();
        candidates.sort_by_key(|(a, _)| a.as_str().to_string());

        for (nonterminal, target) in candidates {
            if !tables.action.contains_key(&(target, current_terminal)) {
                continue;
            }
            let follow_set = &sets.follow[&nonterminal];
            let mut skip_pos = *pos;
            while skip_pos < tokens.len() && !follow_set.contains(&terminal_for(&tokens[skip_pos])) {
                skip_pos += 1;
            }
            if skip_pos >= tokens.len() {
                continue;
            }
            stack.truncate(depth + 1);
            let node = nodes.push(AstNode::error_placeholder(nonterminal));
            stack.push(Frame {
                state: target,
                symbol: nonterminal,
                node: Some(node),
            });
            *pos = skip_pos;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{build, LrMode};
    use crate::grammar::load;
    use crate::sets::compute;
    use teachc_lex::TokenKind;

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, 1)
    }

    fn id_plus_id_times_id() -> Vec<Token> {
        vec![
            tok(TokenKind::Identifier, "id"),
            tok(TokenKind::Operator, "+"),
            tok(TokenKind::Identifier, "id"),
            tok(TokenKind::Operator, "*"),
            tok(TokenKind::Identifier, "id"),
            tok(TokenKind::Eof, ""),
        ]
    }

    #[test]
    fn accepts_classic_expression_and_builds_shaped_ast() {
        let grammar = load("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n").unwrap();
        let sets = compute(&grammar);
        let tables = build(&grammar, &sets, LrMode::Lr0Slr1);
        let outcome = parse(&id_plus_id_times_id(), &grammar, &sets, &tables);

        assert!(outcome.errors.is_empty());
        let ast = outcome.ast.expect("accepted input must produce an AST");
        assert_eq!(ast.nodes[ast.root].label.as_str(), "E");
        assert_eq!(ast.nodes[ast.root].children.len(), 3);

        let accepts = outcome
            .trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Accept))
            .count();
        assert_eq!(accepts, 1);
    }

    #[test]
    fn parse_error_recovers_in_panic_mode_and_still_reports_a_diagnostic() {
        let grammar = load("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id\n").unwrap();
        let sets = compute(&grammar);
        let tables = build(&grammar, &sets, LrMode::Lr0Slr1);
        let tokens = vec![
            tok(TokenKind::Identifier, "id"),
            tok(TokenKind::Operator, "+"),
            tok(TokenKind::Operator, "+"),
            tok(TokenKind::Identifier, "id"),
            tok(TokenKind::Eof, ""),
        ];
        let outcome = parse(&tokens, &grammar, &sets, &tables);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].found, "+");
        assert!(outcome.errors[0].recovered);
    }

    #[test]
    fn dangling_else_input_parses_by_preferring_shift() {
        let grammar = load("S -> i E t S | i E t S e S | a\nE -> b\n").unwrap();
        let sets = compute(&grammar);
        let tables = build(&grammar, &sets, LrMode::Lr0Slr1);
        let tokens = vec![
            tok(TokenKind::Keyword, "i"),
            tok(TokenKind::Keyword, "b"),
            tok(TokenKind::Keyword, "t"),
            tok(TokenKind::Keyword, "i"),
            tok(TokenKind::Keyword, "b"),
            tok(TokenKind::Keyword, "t"),
            tok(TokenKind::Keyword, "a"),
            tok(TokenKind::Keyword, "e"),
            tok(TokenKind::Keyword, "a"),
            tok(TokenKind::Eof, ""),
        ];
        let outcome = parse(&tokens, &grammar, &sets, &tables);
        assert!(outcome.errors.is_empty());
        assert!(outcome.ast.is_some());
    }
}
