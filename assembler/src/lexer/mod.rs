//! Line scanner for pebble assembly source.
//!
//! The grammar is line-oriented. Each non-empty, non-comment line is:
//!
//! ```text
//! [label:] [mnemonic [operand]] [# comment]
//! ```
//!
//! Scanning is zero-copy: every token in a [`Statement`] is a `&str` slice
//! of the source buffer.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AsmError, AsmErrorKind};

/// Character that starts a trailing comment.
pub const COMMENT_CHAR: char = '#';

/// One scanned source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    pub label: Option<&'a str>,
    pub mnemonic: Option<&'a str>,
    pub operand: Option<&'a str>,
    /// 1-based source line number, for diagnostics.
    pub line_number: usize,
}

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

/// Whether a token is a valid label or symbol name.
pub fn is_identifier(token: &str) -> bool {
    identifier_regex().is_match(token)
}

/// Chop the next whitespace-delimited token off the front of `rest`.
fn chop_token<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        *rest = trimmed;
        return None;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((token, tail)) => {
            *rest = tail;
            Some(token)
        }
        None => {
            *rest = "";
            Some(trimmed)
        }
    }
}

/// Scan source text into statements, skipping blank and comment-only lines.
pub fn scan(source: &str) -> Result<Vec<Statement<'_>>, AsmError> {
    let mut statements = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;

        let code = line
            .split_once(COMMENT_CHAR)
            .map_or(line, |(code, _comment)| code);
        let mut rest = code.trim();
        if rest.is_empty() {
            continue;
        }

        let mut statement = Statement {
            label: None,
            mnemonic: None,
            operand: None,
            line_number,
        };

        // The scanner guarantees at least one token on a non-blank line
        let first = match chop_token(&mut rest) {
            Some(token) => token,
            None => continue,
        };

        if let Some(name) = first.strip_suffix(':') {
            if !is_identifier(name) {
                return Err(AsmError::new(
                    line_number,
                    AsmErrorKind::InvalidLabel(name.to_string()),
                ));
            }
            statement.label = Some(name);
            statement.mnemonic = chop_token(&mut rest);
        } else {
            statement.mnemonic = Some(first);
        }

        if statement.mnemonic.is_some() {
            statement.operand = chop_token(&mut rest);
        }

        if let Some(extra) = chop_token(&mut rest) {
            return Err(AsmError::new(
                line_number,
                AsmErrorKind::TrailingToken(extra.to_string()),
            ));
        }

        statements.push(statement);
    }

    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_plain_instruction() {
        let statements = scan("push 42").unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].label, None);
        assert_eq!(statements[0].mnemonic, Some("push"));
        assert_eq!(statements[0].operand, Some("42"));
        assert_eq!(statements[0].line_number, 1);
    }

    #[test]
    fn test_scan_label_definitions() {
        let statements = scan("loop:\nstart: push 1").unwrap();
        assert_eq!(statements.len(), 2);

        assert_eq!(statements[0].label, Some("loop"));
        assert_eq!(statements[0].mnemonic, None);

        assert_eq!(statements[1].label, Some("start"));
        assert_eq!(statements[1].mnemonic, Some("push"));
        assert_eq!(statements[1].operand, Some("1"));
    }

    #[test]
    fn test_scan_skips_blank_and_comment_lines() {
        let source = "\n   \n# a comment\n  push 1  # trailing comment\n";
        let statements = scan(source).unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].mnemonic, Some("push"));
        assert_eq!(statements[0].operand, Some("1"));
        assert_eq!(statements[0].line_number, 4);
    }

    #[test]
    fn test_scan_rejects_trailing_tokens() {
        let result = scan("push 1 2");
        assert_eq!(
            result.unwrap_err(),
            AsmError::new(1, AsmErrorKind::TrailingToken("2".to_string()))
        );
    }

    #[test]
    fn test_scan_rejects_invalid_label_names() {
        let result = scan("1st:");
        assert_eq!(
            result.unwrap_err(),
            AsmError::new(1, AsmErrorKind::InvalidLabel("1st".to_string()))
        );
    }

    #[test]
    fn test_identifier_validation() {
        assert!(is_identifier("loop"));
        assert!(is_identifier("_start2"));
        assert!(!is_identifier("2nd"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
