//! teachc-driver - Compiler Driver
//!
//! ============================================================================
//! PIPELINE ORCHESTRATION
//! ============================================================================
//!
//! This crate is the boundary where the per-phase libraries (`teachc-lex`,
//! `teachc-par`, `teachc-sem`, `teachc-ir`) become one call:
//!
//! ```text
//! source text ──▶ [LexSession::scan]  ──▶ tokens + lex errors
//! tokens      ──▶ [ParseSession::parse] ──▶ trace + AST? + parse errors
//! AST         ──▶ [teachc_sem::resolve_identifiers] ──▶ scope tree
//! AST         ──▶ [teachc_ir::emit] ──▶ quadruples
//! ```
//!
//! [`session::compile`] runs all four steps and merges every phase's
//! diagnostics into one source-ordered list. Nothing in this crate prints or
//! logs — that's `teachc-cli`'s job; this crate only ever returns data or a
//! [`error::TeachcError`] for a malformed rule/grammar file.
//!
//! [`session::LexSession`] and [`session::ParseSession`] exist separately
//! from [`session::compile`] so a caller driving many sources against one
//! rule set or grammar (a REPL, a test harness) can build the automaton
//! once and reuse it.

pub mod error;
pub mod rules;
pub mod session;

pub use error::TeachcError;
pub use session::{compile, CompileOutcome, Diagnostic, LexSession, ParseSession};
