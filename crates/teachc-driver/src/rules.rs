//! Lexical rule file loader: `<regex> <token-kind> <priority>`,
//! one rule per non-blank, non-comment (`#`) line. Rules are handed to
//! [`teachc_lex::LexerDriver::build`] in descending-priority order (a stable
//! sort, so two rules of equal priority keep their file order) — the
//! driver's own tie-break is "earliest in the list wins", so this is what
//! turns a numeric priority into that ordering.

use crate::error::TeachcError;
use teachc_lex::{Rule, TokenKind};

/// Map a rule file's token-kind field to a [`TokenKind`]. Names are matched
/// case-insensitively against the kinds a rule file can legitimately name;
/// `Error` and `Eof` are driver-synthesized and never come from a rule file.
/// Anything else falls back to `Operator` — the kind categorizes how the
/// driver treats the lexeme (nothing about parsing depends on getting an
/// unrecognized name exactly right).
fn token_kind_from_name(name: &str) -> TokenKind {
    match name.to_ascii_uppercase().as_str() {
        "KEYWORD" => TokenKind::Keyword,
        "IDENTIFIER" => TokenKind::Identifier,
        "LITERAL_INT" | "INT" => TokenKind::LiteralInt,
        "LITERAL_FLOAT" | "FLOAT" => TokenKind::LiteralFloat,
        "LITERAL_STRING" | "STRING" => TokenKind::LiteralString,
        "LITERAL_CHAR" | "CHAR" => TokenKind::LiteralChar,
        "OPERATOR" => TokenKind::Operator,
        "DELIMITER" => TokenKind::Delimiter,
        "COMMENT" => TokenKind::Comment,
        "WHITESPACE" => TokenKind::Whitespace,
        "NEWLINE" => TokenKind::Newline,
        _ => TokenKind::Operator,
    }
}

pub fn load_rules(text: &str) -> Result<Vec<Rule>, TeachcError> {
    let mut entries: Vec<(i64, usize, Rule)> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(TeachcError::MalformedRule {
                line,
                text: raw_line.to_string(),
            });
        }
        let (pattern, kind_name, priority_text) = (fields[0], fields[1], fields[2]);
        let priority: i64 = priority_text
            .parse()
            .map_err(|_| TeachcError::BadPriority {
                line,
                value: priority_text.to_string(),
            })?;

        entries.push((priority, index, Rule::new(token_kind_from_name(kind_name), pattern)));
    }

    entries.sort_by_key(|(priority, index, _)| (-*priority, *index));
    Ok(entries.into_iter().map(|(_, _, rule)| rule).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_priority_rule_sorts_first_regardless_of_line_order() {
        let rules = load_rules("[a-zA-Z_][a-zA-Z0-9_]* IDENTIFIER 5\nif KEYWORD 10\n").unwrap();
        assert_eq!(rules[0].kind, TokenKind::Keyword);
        assert_eq!(rules[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn equal_priority_keeps_file_order() {
        let rules = load_rules("a OPERATOR 1\nb OPERATOR 1\n").unwrap();
        assert_eq!(rules[0].pattern, "a");
        assert_eq!(rules[1].pattern, "b");
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let rules = load_rules("# a comment\n\nif KEYWORD 10\n").unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn malformed_line_is_reported_with_its_line_number() {
        let err = load_rules("if KEYWORD\n").unwrap_err();
        assert!(matches!(err, TeachcError::MalformedRule { line: 1, .. }));
    }
}
