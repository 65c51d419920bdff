//! teachc-par - Grammar Loading and LR Parser Generation
//!
//! ============================================================================
//! SYNTAX ANALYSIS THEORY
//! ============================================================================
//!
//! A context-free grammar describes how a terminal stream (the output of
//! `teachc-lex`) reduces to a single start symbol. This crate builds the
//! bottom-up machinery that recognizes a grammar and drives a parse:
//!
//! 1. GRAMMAR LOADING ([`grammar`])
//!    A small text format (`LHS -> rhs1 | rhs2 | ...`) loads into a
//!    [`grammar::Grammar`] of numbered [`grammar::Production`]s, augmented
//!    with a fresh start production `S' -> S` so the automaton has a single
//!    accepting item.
//!
//! 2. FIRST/FOLLOW ([`sets`])
//!    Fixed-point iteration produces [`sets::SymbolSets`], consumed by both
//!    SLR(1) reduce placement and LR(1) closure lookaheads.
//!
//! 3. LR AUTOMATON ([`automaton`])
//!    CLOSURE and GOTO over canonicalized item sets build the ACTION/GOTO
//!    tables, either LR(0)/SLR(1) or canonical LR(1) depending on
//!    [`automaton::LrMode`]. Shift-reduce and reduce-reduce collisions are
//!    resolved by a fixed rule and recorded, never aborted.
//!
//! 4. LR DRIVER ([`driver`])
//!    A table-driven shift-reduce interpreter walks a token stream against
//!    the automaton, synthesizing an AST node on every reduce and recording
//!    a full step trace. A token the ACTION table has no entry for triggers
//!    panic-mode recovery rather than aborting the parse outright.
//!
//! 5. AST ([`ast`])
//!    An arena of nodes ([`ast::Ast`]) built directly by the driver's reduce
//!    step, with an optional pass collapsing degenerate single-child chains.
//!
//! ============================================================================
//! WHAT THIS CRATE DOES NOT DO
//! ============================================================================
//!
//! Grammar ambiguity beyond shift-reduce/reduce-reduce resolution, grammar
//! transformation (left-recursion elimination, left-factoring), and error
//! messages tailored to a specific language are all out of scope; the
//! grammar text a caller loads is taken as given.

pub mod ast;
pub mod automaton;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod sets;

pub use ast::{Ast, AstNode, AstNodeId};
pub use automaton::{Action, Item, ItemSet, ItemSetId, LrMode, Tables};
pub use driver::{parse, terminal_for, ParseOutcome, StepAction, TraceStep};
pub use error::{GrammarError, ParseError};
pub use grammar::{Grammar, Production, ProductionId};
pub use sets::SymbolSets;
