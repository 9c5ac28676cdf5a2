//! Reads and writes `module.exports = { ... }` config modules (babel.config.js).
//!
//! The exported object literal is rewritten into JSON and handed to
//! `serde_json`. Only plain data is accepted: strings in either quote style,
//! bare identifier keys, trailing commas and comments. Code in the module
//! (requires, template literals, function values) makes it unreadable.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, ScaffoldError, SoftFailure};
use crate::patch::lines::write_atomic;

const EXPORTS: &str = "module.exports";

/// Loads a config module. The outer result carries I/O failures; the inner
/// one reports a module this loader cannot read. A missing file is `{}`.
pub fn load(path: &Path) -> Result<std::result::Result<Value, SoftFailure>> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(parse(&source)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Ok(Value::Object(Map::new()))),
        Err(e) => Err(ScaffoldError::io(path, e)),
    }
}

pub fn save(path: &Path, config: &Value) -> Result<()> {
    write_atomic(path, render(config)?.as_bytes())
}

pub fn render(config: &Value) -> Result<String> {
    Ok(format!(
        "{EXPORTS} = {}\n",
        serde_json::to_string_pretty(config)?
    ))
}

pub fn parse(source: &str) -> std::result::Result<Value, SoftFailure> {
    let normalized = to_json(source)?;
    if normalized.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let body = normalized
        .trim()
        .strip_prefix(EXPORTS)
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .ok_or_else(|| unreadable("expected `module.exports = { ... }`"))?;
    let body = body.trim().trim_end_matches(';');

    let value: Value = serde_json::from_str(body).map_err(|e| unreadable(&e.to_string()))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(unreadable("exported value is not an object"))
    }
}

fn unreadable(reason: &str) -> SoftFailure {
    SoftFailure::ConfigUnreadable(reason.to_string())
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// First character at or after `from` that is neither whitespace nor inside a comment.
fn next_significant(chars: &[char], from: usize) -> Option<char> {
    let mut i = from;
    while i < chars.len() {
        match (chars[i], chars.get(i + 1).copied()) {
            (c, _) if c.is_whitespace() => i += 1,
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            (c, _) => return Some(c),
        }
    }
    None
}

/// Rewrites the data subset of a JS object literal into JSON text.
fn to_json(source: &str) -> std::result::Result<String, SoftFailure> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                i += 1;
                out.push('"');
                loop {
                    let Some(&ch) = chars.get(i) else {
                        return Err(unreadable("unterminated string"));
                    };
                    i += 1;
                    match ch {
                        '\\' => {
                            let Some(&escaped) = chars.get(i) else {
                                return Err(unreadable("unterminated string"));
                            };
                            i += 1;
                            if escaped == '\'' {
                                out.push('\'');
                            } else {
                                out.push('\\');
                                out.push(escaped);
                            }
                        }
                        ch if ch == c => break,
                        '"' => out.push_str("\\\""),
                        '\n' => return Err(unreadable("unterminated string")),
                        _ => out.push(ch),
                    }
                }
                out.push('"');
            }
            '`' => return Err(unreadable("template literals are not supported")),
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(unreadable("unterminated comment"));
                }
                i += 2;
            }
            ',' => {
                // trailing commas
                if !matches!(next_significant(&chars, i + 1), Some('}' | ']')) {
                    out.push(',');
                }
                i += 1;
            }
            c if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                if next_significant(&chars, i) == Some(':') {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    Ok(out)
}
