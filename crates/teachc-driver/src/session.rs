//! Pipeline orchestration: read -> lex -> parse -> build AST -> resolve
//! names -> emit IR, with every phase's diagnostics merged into one
//! source-ordered list. No blocking I/O happens beyond reading inputs
//! once at this boundary.

use crate::error::TeachcError;
use crate::rules::load_rules;
use teachc_ir::Quadruple;
use teachc_lex::{LexError, LexerDriver, Token};
use teachc_par::{automaton, driver as lr_driver, grammar, sets, Ast, LrMode, ParseError, Tables};
use teachc_sem::ScopeTree;

/// A compiled lexer, ready to scan any number of source strings.
pub struct LexSession {
    driver: LexerDriver,
}

impl LexSession {
    pub fn load(rules_text: &str) -> Result<Self, TeachcError> {
        let rules = load_rules(rules_text)?;
        let driver = LexerDriver::build(rules)?;
        Ok(Self { driver })
    }

    /// Significant tokens only (whitespace/newline/comment dropped) — the
    /// view every later phase consumes.
    pub fn scan(&self, source: &str) -> (Vec<Token>, Vec<LexError>) {
        self.driver.scan_significant(source)
    }
}

/// A built LR automaton, ready to parse any number of token streams against
/// the same grammar.
pub struct ParseSession {
    grammar: grammar::Grammar,
    symbol_sets: sets::SymbolSets,
    tables: Tables,
}

impl ParseSession {
    pub fn load(grammar_text: &str, mode: LrMode) -> Result<Self, TeachcError> {
        let grammar = grammar::load(grammar_text)?;
        let symbol_sets = sets::compute(&grammar);
        let tables = automaton::build(&grammar, &symbol_sets, mode);
        Ok(Self {
            grammar,
            symbol_sets,
            tables,
        })
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn parse(&self, tokens: &[Token]) -> lr_driver::ParseOutcome {
        lr_driver::parse(tokens, &self.grammar, &self.symbol_sets, &self.tables)
    }
}

/// One phase's diagnostic, tagged so [`CompileOutcome::diagnostics`] can be
/// sorted into source order regardless of which phase produced it.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    Lex(LexError),
    Parse(ParseError),
}

impl Diagnostic {
    pub fn line(&self) -> u32 {
        match self {
            Diagnostic::Lex(e) => e.line,
            Diagnostic::Parse(e) => e.line,
        }
    }

    pub fn column(&self) -> u32 {
        match self {
            Diagnostic::Lex(e) => e.column,
            Diagnostic::Parse(e) => e.column,
        }
    }
}

fn merge_diagnostics(lex_errors: Vec<LexError>, parse_errors: Vec<ParseError>) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(Diagnostic::Lex)
        .chain(parse_errors.into_iter().map(Diagnostic::Parse))
        .collect();
    diagnostics.sort_by_key(|d| (d.line(), d.column()));
    diagnostics
}

/// Every artifact one `compile` call can hand back: tokens, the parse
/// trace, the AST (absent if the parser could not recover), a name-scope
/// tree built from that AST, the emitted quadruples, and every diagnostic
/// from every phase in source order.
pub struct CompileOutcome {
    pub tokens: Vec<Token>,
    pub trace: Vec<lr_driver::TraceStep>,
    pub ast: Option<Ast>,
    pub scope: Option<ScopeTree>,
    pub quads: Vec<Quadruple>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline once. `rules_text`/`grammar_text` are parsed fresh
/// on every call; a caller driving many sources against the same rules or
/// grammar should build [`LexSession`]/[`ParseSession`] once and reuse them.
pub fn compile(source: &str, rules_text: &str, grammar_text: &str, mode: LrMode) -> Result<CompileOutcome, TeachcError> {
    let lexer = LexSession::load(rules_text)?;
    let (tokens, lex_errors) = lexer.scan(source);

    let parser = ParseSession::load(grammar_text, mode)?;
    let outcome = parser.parse(&tokens);

    let scope = outcome.ast.as_ref().map(teachc_sem::resolve_identifiers);
    let quads = outcome.ast.as_ref().map(teachc_ir::emit).unwrap_or_default();
    let diagnostics = merge_diagnostics(lex_errors, outcome.errors);

    Ok(CompileOutcome {
        tokens,
        trace: outcome.trace,
        ast: outcome.ast,
        scope,
        quads,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "\
        if|else|while KEYWORD 10\n\
        [a-zA-Z_][a-zA-Z0-9_]* IDENTIFIER 5\n\
        [0-9]+ LITERAL_INT 5\n\
        [ \t]+ WHITESPACE 1\n\
        := OPERATOR 6\n\
        [+*/()] OPERATOR 5\n\
    ";
    const GRAMMAR: &str = "\
        Stmt -> id := Expr\n\
        Expr -> Expr + T | T\n\
        T -> T * F | F\n\
        F -> ( Expr ) | id | number\n\
    ";

    #[test]
    fn compiles_an_assignment_straight_through_to_quadruples() {
        let outcome = compile("x := a + 3", RULES, GRAMMAR, LrMode::Lr0Slr1).unwrap();
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.ast.is_some());
        assert_eq!(outcome.quads.len(), 2);
    }

    #[test]
    fn unknown_byte_in_source_surfaces_as_a_lex_diagnostic() {
        let outcome = compile("x := a @ 3", RULES, GRAMMAR, LrMode::Lr0Slr1).unwrap();
        assert!(outcome.diagnostics.iter().any(|d| matches!(d, Diagnostic::Lex(_))));
    }
}
