//! Packaging glob to regex translation.
//!
//! Supported syntax: `*` (within a path segment), `**` (any number of
//! segments), `?`, `{a,b}` alternation and `\` escapes. A leading `/`
//! anchors the pattern at the archive root; without it the pattern may
//! match at any depth.

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("pattern '{0}': nested '{{' is not supported")]
    NestedBrace(String),
    #[error("pattern '{0}': unmatched '}}'")]
    UnmatchedClose(String),
    #[error("pattern '{0}': unclosed '{{'")]
    Unclosed(String),
    #[error("pattern '{0}': dangling escape")]
    DanglingEscape(String),
    #[error("pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        source: regex::Error,
    },
}

/// Compile a packaging glob.
pub fn compile(pattern: &str) -> Result<Regex, PatternError> {
    let source = translate(pattern)?;
    Regex::new(&source).map_err(|source| PatternError::Regex {
        pattern: pattern.to_string(),
        source,
    })
}

fn translate(pattern: &str) -> Result<String, PatternError> {
    let body = pattern.strip_prefix('/');
    let anchored = body.is_some();
    let body = body.unwrap_or(pattern);
    if body.is_empty() {
        return Err(PatternError::Empty);
    }

    let mut out = String::from("^");
    if !anchored {
        out.push_str("(?:.*/)?");
    }

    let mut in_brace = false;
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' if in_brace => return Err(PatternError::NestedBrace(pattern.to_string())),
            '{' => {
                in_brace = true;
                out.push_str("(?:");
            }
            '}' if !in_brace => return Err(PatternError::UnmatchedClose(pattern.to_string())),
            '}' => {
                in_brace = false;
                out.push(')');
            }
            ',' if in_brace => out.push('|'),
            '\\' => match chars.next() {
                Some(lit) => out.push_str(&regex::escape(&lit.to_string())),
                None => return Err(PatternError::DanglingEscape(pattern.to_string())),
            },
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    if in_brace {
        return Err(PatternError::Unclosed(pattern.to_string()));
    }
    out.push('$');
    Ok(out)
}
