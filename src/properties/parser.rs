//! Properties text format.
//!
//! Follows `java.util.Properties` with one restriction: a separator (`=`
//! or `:`) is required, so a bare key is reported as malformed instead of
//! becoming an empty value. Lines end at `\n`, `\r\n` or a lone `\r`.

use std::path::Path;

use super::BuildProperties;
use crate::models::{Diagnostic, Resolved};

/// Whitespace as the Java properties format defines it.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parse properties text. `origin` is only used to label diagnostics.
pub fn parse(content: &str, origin: &Path) -> Resolved<BuildProperties> {
    let mut resolved = Resolved::clean(BuildProperties::default());
    let mut lines = physical_lines(content).into_iter().enumerate();

    while let Some((idx, line)) = lines.next() {
        let trimmed = line.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        match split_entry(&logical) {
            Some((key, value)) => {
                resolved.value.entries.insert(key, value);
            }
            None => resolved.warn(Diagnostic::MalformedLine {
                file: origin.to_path_buf(),
                line: idx + 1,
            }),
        }
    }

    resolved
}

fn physical_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(i) => {
                lines.push(&rest[..i]);
                let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// An odd number of trailing backslashes joins the next line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> Option<(String, String)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let key = unescape(trim_end_unescaped(&line[..i]))?;
                if key.is_empty() {
                    return None;
                }
                let value = unescape(line[i + 1..].trim_start_matches(is_blank))?;
                return Some((key, value));
            }
            _ => {}
        }
    }
    None
}

/// Trim trailing whitespace that is not protected by a backslash.
fn trim_end_unescaped(s: &str) -> &str {
    let mut end = s.len();
    while let Some(c) = s[..end].chars().last() {
        if !is_blank(c) {
            break;
        }
        let before = &s[..end - c.len_utf8()];
        if before.chars().rev().take_while(|&b| b == '\\').count() % 2 == 1 {
            break;
        }
        end -= c.len_utf8();
    }
    &s[..end]
}

/// Resolve backslash escapes. `None` for a broken `\uXXXX` sequence.
fn unescape(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = hex_unit(&mut chars)?;
                let code = if (0xD800..0xDC00).contains(&unit) {
                    // high surrogate: the low half must follow as `\uXXXX`
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return None;
                    }
                    let low = hex_unit(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return None;
                    }
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    unit
                };
                out.push(char::from_u32(code)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Some(out)
}

/// Four hex digits of a `\u` escape.
fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

/// Escape a key or value so [`parse`] reads it back unchanged.
pub(crate) fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}
