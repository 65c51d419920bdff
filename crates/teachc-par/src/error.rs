//! Error types for the grammar loader and the LR driver.

use thiserror::Error;

/// A malformed grammar file.
///
/// Surfaced at load time; a `GrammarError` aborts the whole grammar build,
/// unlike `RegexError` which only aborts one rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// An explicit `%start` declaration named a symbol that never appears
    /// as the lhs of any production.
    #[error("line {line}: undeclared start symbol '{symbol}'")]
    UndeclaredSymbol { line: usize, symbol: String },

    /// More than one `%start` directive appeared in the same grammar file.
    #[error("line {line}: multiple %start declarations")]
    MultipleStarts { line: usize },

    /// A non-comment, non-blank line had no `->`/`→` arrow, or an empty lhs.
    #[error("line {line}: malformed production line: {text:?}")]
    MalformedLine { line: usize, text: String },

    /// The grammar file contained no productions at all.
    #[error("grammar file has no productions")]
    Empty,
}

/// A token the LR driver could not shift or reduce under the current
/// ACTION table. Recovered by
/// panic-mode (see [`crate::driver`]) unless no synchronizing state exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected token {found:?} at {line}:{column}, expected one of {expected:?}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub found: String,
    pub expected: Vec<String>,
    /// Whether panic-mode recovery found a synchronizing state and resumed.
    pub recovered: bool,
}
