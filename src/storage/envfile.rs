//! Parser for `todo.cfg` style configuration files
//!
//! The format is a shell-compatible subset:
//!
//! ```text
//! # comment
//! TODO_DIR="$HOME/todo"
//! export TODO_FILE="$TODO_DIR/todo.txt"
//! TODOTXT_FORCE=0   # trailing comment
//! ```
//!
//! Values are taken literally. `$VAR` references are left untouched here
//! and expanded later by the settings resolver.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration {}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// A single `KEY=VALUE` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

/// Reads and parses a configuration file
pub fn load(path: &Path) -> Result<Vec<Assignment>, EnvFileError> {
    let content = fs::read_to_string(path).map_err(|source| EnvFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&content).map_err(|(line, message)| EnvFileError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Parses configuration text. Errors carry the 1-based line number.
pub fn parse(content: &str) -> Result<Vec<Assignment>, (usize, String)> {
    let mut assignments = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let assignment = parse_line(line).map_err(|message| (index + 1, message))?;
        assignments.push(assignment);
    }

    Ok(assignments)
}

fn parse_line(line: &str) -> Result<Assignment, String> {
    let line = match line.strip_prefix("export") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    };

    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, found '{}'", line))?;

    let key = key.trim_end();
    if !is_valid_key(key) {
        return Err(format!("invalid variable name '{}'", key));
    }

    Ok(Assignment {
        key: key.to_string(),
        value: parse_value(value.trim_start())?,
    })
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn parse_value(value: &str) -> Result<String, String> {
    let quote = match value.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => {
            // Unquoted: an inline comment starts at whitespace followed by '#'
            let end = value
                .char_indices()
                .find(|&(i, c)| c == '#' && value[..i].ends_with(char::is_whitespace))
                .map(|(i, _)| i)
                .unwrap_or(value.len());
            return Ok(value[..end].trim_end().to_string());
        }
    };

    let body = &value[1..];
    let close = body
        .find(quote)
        .ok_or_else(|| format!("unterminated {} quote", quote))?;

    let rest = body[close + 1..].trim_start();
    if !rest.is_empty() && !rest.starts_with('#') {
        return Err(format!("unexpected text after closing quote: '{}'", rest));
    }

    Ok(body[..close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pairs(content: &str) -> Vec<(String, String)> {
        parse(content)
            .unwrap()
            .into_iter()
            .map(|a| (a.key, a.value))
            .collect()
    }

    #[test]
    fn parse_plain_and_export() {
        let parsed = pairs("TODO_DIR=/x\nexport TODO_FILE=$TODO_DIR/todo.txt\n");
        assert_eq!(
            parsed,
            vec![
                ("TODO_DIR".to_string(), "/x".to_string()),
                ("TODO_FILE".to_string(), "$TODO_DIR/todo.txt".to_string()),
            ]
        );
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let parsed = pairs("# header\n\n   \n  # indented comment\nA=1\n");
        assert_eq!(parsed, vec![("A".to_string(), "1".to_string())]);
    }

    #[test]
    fn parse_quoted_values() {
        let parsed = pairs("A=\"$HOME/todo\"\nB='single # not comment'\nC=\"\"\n");
        assert_eq!(parsed[0].1, "$HOME/todo");
        assert_eq!(parsed[1].1, "single # not comment");
        assert_eq!(parsed[2].1, "");
    }

    #[test]
    fn parse_inline_comment() {
        let parsed = pairs("TODOTXT_FORCE=0   # same as -f\nURL=a#b\nQ=\"x\" # quoted\n");
        assert_eq!(parsed[0].1, "0");
        assert_eq!(parsed[1].1, "a#b");
        assert_eq!(parsed[2].1, "x");
    }

    #[test]
    fn parse_spaces_around_equals() {
        let parsed = pairs("export   KEY = value\n");
        assert_eq!(parsed, vec![("KEY".to_string(), "value".to_string())]);
    }

    #[test]
    fn parse_key_named_export() {
        let parsed = pairs("exported=1\n");
        assert_eq!(parsed, vec![("exported".to_string(), "1".to_string())]);
    }

    #[test]
    fn parse_rejects_missing_equals() {
        let err = parse("A=1\nthis is not an assignment\n").unwrap_err();
        assert_eq!(err.0, 2);
    }

    #[test]
    fn parse_rejects_invalid_key() {
        assert!(parse("1ABC=x\n").is_err());
        assert!(parse("=x\n").is_err());
        assert!(parse("MY-KEY=x\n").is_err());
    }

    #[test]
    fn parse_rejects_unterminated_quote() {
        let err = parse("A=\"open\n").unwrap_err();
        assert!(err.1.contains("unterminated"));
    }

    #[test]
    fn load_reports_path_and_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.cfg");
        fs::write(&path, "A=1\n\nbroken line\n").unwrap();

        let err = load(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("todo.cfg:3"));
        assert!(matches!(err, EnvFileError::Parse { line: 3, .. }));
    }
}
