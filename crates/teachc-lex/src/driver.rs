//! Lexer driver: simulates the minimized DFA over a source string with
//! longest-match semantics, priority resolved by rule order (earliest rule
//! wins, already baked into the DFA's accept labels by [`crate::dfa`]).
//!
//! On a dead end with no prior accept in the current attempt, the driver
//! recovers by emitting a single-character [`TokenKind::Error`] token and
//! resuming from the next character — one bad byte never aborts the scan.

use crate::cursor::Cursor;
use crate::dfa::{subset_construct, Dfa};
use crate::error::{LexError, RegexError};
use crate::minimize::minimize;
use crate::nfa::compile_rules;
use crate::regex::parse;
use crate::token::{Token, TokenKind};

/// One lexical rule: a pattern and the token kind it produces when matched.
/// Rules are checked in the order supplied to [`LexerDriver::build`]; on a
/// tie (two rules' DFA paths both reach an accept state) the earliest-listed
/// rule wins.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: TokenKind,
    pub pattern: String,
}

impl Rule {
    pub fn new(kind: TokenKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }
}

/// A compiled lexer: a minimized DFA plus the rule list it was built from,
/// so accept labels (rule indices) can be mapped back to [`TokenKind`]s.
#[derive(Debug)]
pub struct LexerDriver {
    rules: Vec<Rule>,
    dfa: Dfa,
}

impl LexerDriver {
    /// Compile `rules` through the regex -> NFA -> DFA -> minimized-DFA
    /// pipeline. Fails with the first rule whose pattern does not parse.
    pub fn build(rules: Vec<Rule>) -> Result<Self, RegexError> {
        let postfixes = rules
            .iter()
            .map(|r| parse(&r.pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let combined = compile_rules(&postfixes);
        let dfa = minimize(&subset_construct(&combined));
        Ok(Self { rules, dfa })
    }

    /// Scan the entire source, returning every token (including
    /// [`TokenKind::Whitespace`]/[`TokenKind::Newline`]/[`TokenKind::Comment`]
    /// tokens if any rule produces them) plus the list of recovered lex
    /// errors, in source order. Always ends with exactly one
    /// [`TokenKind::Eof`] token.
    pub fn scan(&self, source: &str) -> (Vec<Token>, Vec<LexError>) {
        let mut cursor = Cursor::new(source);
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while !cursor.is_at_end() {
            let token_line = cursor.line();
            let token_column = cursor.column();
            let token_start = cursor.position();

            let mut state = self.dfa.start;
            let mut last_accept: Option<(usize, crate::cursor::CursorSnapshot)> = None;

            while !cursor.is_at_end() {
                let c = cursor.current_char();
                match self.dfa.states[state].transitions.get(&c) {
                    Some(&next) => {
                        cursor.advance();
                        state = next;
                        if let Some(rule_index) = self.dfa.states[state].accept {
                            last_accept = Some((rule_index, cursor.snapshot()));
                        }
                    }
                    None => break,
                }
            }

            match last_accept {
                Some((rule_index, snapshot)) => {
                    cursor.restore(snapshot);
                    let lexeme = cursor.slice_from(token_start).to_string();
                    tokens.push(Token::new(
                        self.rules[rule_index].kind,
                        lexeme,
                        token_line,
                        token_column,
                    ));
                }
                None => {
                    cursor.restore(crate::cursor::CursorSnapshot {
                        position: token_start,
                        line: token_line,
                        column: token_column,
                    });
                    let bad = cursor.current_char();
                    cursor.advance();
                    errors.push(LexError {
                        line: token_line,
                        column: token_column,
                        bad_character: bad,
                    });
                    tokens.push(Token::new(TokenKind::Error, bad, token_line, token_column));
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", cursor.line(), cursor.column()));
        (tokens, errors)
    }

    /// [`scan`](Self::scan), with whitespace, newline, and comment tokens
    /// dropped — the view a parser wants to see.
    pub fn scan_significant(&self, source: &str) -> (Vec<Token>, Vec<LexError>) {
        let (tokens, errors) = self.scan(source);
        let tokens = tokens
            .into_iter()
            .filter(|t| {
                !matches!(
                    t.kind,
                    TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
                )
            })
            .collect();
        (tokens, errors)
    }
}
