//! Driver-level error type: wraps the per-phase errors a [`crate::session`]
//! call can fail with before it ever reaches a token or parse tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeachcError {
    #[error("line {line}: malformed rule line: {text:?}")]
    MalformedRule { line: usize, text: String },

    #[error("line {line}: rule priority {value:?} is not an integer")]
    BadPriority { line: usize, value: String },

    #[error(transparent)]
    Regex(#[from] teachc_lex::RegexError),

    #[error(transparent)]
    Grammar(#[from] teachc_par::GrammarError),
}
