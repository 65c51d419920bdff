//! End-to-end pipeline tests driving [`teachc_driver::compile`] straight
//! through rule-file text and grammar text to quadruples, covering the
//! accepting and error-recovery scenarios the core's testable properties
//! name.

use teachc_driver::{compile, Diagnostic};
use teachc_par::LrMode;

const EXPRESSION_RULES: &str = "\
[a-zA-Z_][a-zA-Z0-9_]* IDENTIFIER 5\n\
[0-9]+ LITERAL_INT 5\n\
[ \t]+ WHITESPACE 1\n\
[+*()] OPERATOR 5\n\
";

const EXPRESSION_GRAMMAR: &str = "\
E -> E + T | T\n\
T -> T * F | F\n\
F -> ( E ) | id\n\
";

#[test]
fn well_formed_expression_parses_with_no_diagnostics() {
    let outcome = compile("id + id * id", EXPRESSION_RULES, EXPRESSION_GRAMMAR, LrMode::Lr0Slr1).unwrap();
    assert!(outcome.diagnostics.is_empty());
    let ast = outcome.ast.expect("a well-formed expression must produce an AST");
    assert_eq!(ast.nodes[ast.root].label.as_str(), "E");
}

#[test]
fn double_operator_recovers_and_reports_one_diagnostic() {
    let outcome = compile("id + + id", EXPRESSION_RULES, EXPRESSION_GRAMMAR, LrMode::Lr0Slr1).unwrap();
    let parse_diagnostics: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::Parse(_)))
        .collect();
    assert_eq!(parse_diagnostics.len(), 1);
}

#[test]
fn malformed_grammar_file_is_reported_before_any_parsing_happens() {
    let err = compile("id", EXPRESSION_RULES, "not a grammar line\n", LrMode::Lr0Slr1).unwrap_err();
    assert!(matches!(err, teachc_driver::TeachcError::Grammar(_)));
}
