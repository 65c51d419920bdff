//! teachc-lex - Lexical Analyzer Construction
//!
//! ============================================================================
//! LEXICAL ANALYSIS THEORY
//! ============================================================================
//!
//! Lexical analysis is the first phase of compilation. It transforms a stream
//! of characters into a stream of tokens. This process is also called
//! "tokenization" or "scanning".
//!
//! FORMAL DEFINITION:
//! ------------------
//! Let Σ be the alphabet (set of all valid characters).
//! Let Σ* be the set of all strings over Σ.
//!
//! The lexer is a function:
//!   L: Σ* → T*
//! where T is the set of tokens.
//!
//! PROPERTIES:
//! -----------
//! - Linear time complexity: O(n) where n = input length
//! - Single-pass processing
//! - Context-free (doesn't consider surrounding tokens)
//!
//! LEXEME vs TOKEN:
//! ----------------
//! - Lexeme: the actual string of characters matched ("let", "123", "+")
//! - Token: the lexeme plus its category and source position
//!
//! ============================================================================
//! THIS CRATE'S PIPELINE
//! ============================================================================
//!
//! Rather than hand-coding a recursive-descent scanner per token kind, this
//! crate builds a lexer the way a lexer-generator (lex/flex, re2c) does:
//! rule patterns compile through four stages before a single input character
//! is scanned.
//!
//! 1. REGEX PARSER ([`regex`])
//!    Shunting-yard over `|` (alternation), implicit concatenation, and
//!    postfix `*`/`+`/`?`, with character classes and `\d`/`\w`/`\s` expanded
//!    into alternation up front. Produces a postfix operator stream.
//!
//! 2. THOMPSON CONSTRUCTION ([`nfa`])
//!    Folds the postfix stream into an NFA fragment (one rule at a time),
//!    then stitches every rule's fragment onto a shared super-start state via
//!    epsilon transitions, tagging each fragment's accept state with the
//!    rule's priority (its position in the rule list).
//!
//! 3. SUBSET CONSTRUCTION ([`dfa`])
//!    Turns the combined NFA into a DFA whose states are epsilon-closed sets
//!    of NFA states. A DFA state that contains more than one rule's accept
//!    state resolves to the lowest rule index — "earliest rule wins" ties,
//!    the same convention lex/flex use for "longest match, first rule".
//!
//! 4. MINIMIZATION ([`minimize`])
//!    Partition-refinement collapses equivalent states, keeping accept-label
//!    boundaries intact so two states that accept different token kinds are
//!    never merged even if their transition behavior is otherwise identical.
//!
//! The result is simulated by [`driver::LexerDriver`]: a single DFA walk per
//! token, tracking the last position an accept state was seen, backtracking
//! to it on a dead end (longest match), and recovering from unmatched bytes
//! by emitting a single-character [`token::TokenKind::Error`] token.
//!
//! ============================================================================
//! TOKEN CATEGORIES
//! ============================================================================
//!
//! See [`token::TokenKind`] for the full set. A rule's declared kind is
//! opaque to the pipeline above — the driver never infers a category from a
//! lexeme's shape, it only ever reports which rule matched.

pub mod cursor;
pub mod dfa;
pub mod driver;
pub mod error;
pub mod minimize;
pub mod nfa;
pub mod regex;
pub mod token;
pub mod unicode;

pub use dfa::{Dfa, DfaState, DfaStateId};
pub use driver::{LexerDriver, Rule};
pub use error::{LexError, RegexError};
pub use nfa::{CombinedNfa, Nfa, NfaState, StateId};
pub use token::{Token, TokenKind};
