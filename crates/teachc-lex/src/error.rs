//! Error types for the regex-to-DFA pipeline and the lexer driver.

use thiserror::Error;

/// A malformed lexical rule pattern.
///
/// Surfaced per-rule at lexer-build time. A `RegexError` aborts only the
/// rule that produced it; the lexer driver still builds from the remaining
/// rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    /// A `(` was never closed, or a `)` appeared with nothing open.
    #[error("unbalanced group at position {position}")]
    UnbalancedGroup { position: usize },

    /// An operator (`|`, `*`, `+`, `?`) had no left operand.
    #[error("dangling operator '{op}' at position {position}")]
    DanglingOperator { op: char, position: usize },

    /// `|` with nothing between it and a following `|`, `)`, or end of input.
    #[error("empty alternative at position {position}")]
    EmptyAlternative { position: usize },

    /// `\` at the end of the pattern, or followed by a character that is not
    /// a recognized escape.
    #[error("bad escape sequence at position {position}")]
    BadEscape { position: usize },

    /// A `[...]` character class was never closed.
    #[error("unterminated character class at position {position}")]
    UnterminatedClass { position: usize },

    /// A `a-z` range inside a character class where `a` sorts after `z`.
    #[error("invalid character range '{lo}-{hi}' at position {position}")]
    InvalidRange {
        lo: char,
        hi: char,
        position: usize,
    },

    /// The pattern was the empty string.
    #[error("empty pattern")]
    EmptyPattern,
}

/// One unrecognized input byte the lexer driver could not match against any
/// rule. Recovered automatically: the
/// driver emits an ERROR token and continues from the next character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character {bad_character:?} at {line}:{column}")]
pub struct LexError {
    pub line: u32,
    pub column: u32,
    pub bad_character: char,
}
