//! Reference token scanner.
//!
//! Finds `vault_path:`, `asm_path:` and `secret_path:` references inside a
//! value and splits each into its path/key/subkey components. Byte ranges are
//! captured at scan time so substitution never has to search for the token
//! text again.

use crate::secrets::{SecretError, SecretRequest, SecretResult, StoreKind};
use regex::Regex;
use std::ops::Range;

/// Delimiters between token components
const DELIMITERS: [char; 3] = [' ', ':', ','];

/// A reference token found in a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceToken<'a> {
    pub kind: StoreKind,
    /// Matched text, prefix included
    pub text: &'a str,
    /// Byte range of `text` within the scanned value
    pub range: Range<usize>,
    pub path: &'a str,
    pub key: &'a str,
    pub subkey: Option<&'a str>,
}

impl<'a> ReferenceToken<'a> {
    pub fn request(&self) -> SecretRequest<'a> {
        SecretRequest::new(self.path, self.key).with_subkey(self.subkey)
    }
}

/// Scanner for reference tokens
pub struct TokenScanner {
    pattern: Regex,
}

impl Default for TokenScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenScanner {
    /// Create a new scanner with the compiled token grammar
    pub fn new() -> Self {
        Self {
            // One alternative per prefix. Each takes a path and then at most as
            // many components as its store understands:
            //   vault_path:<path>[ :]<key>
            //   asm_path:<path>[ :]<key>[ :]<subkey>
            //   secret_path:<path> <key>   (no hyphen in paths)
            pattern: Regex::new(concat!(
                r"(?:vault_path:[A-Za-z0-9_/\-]*(?:[ :]+[A-Za-z0-9_/\-]+)?)",
                r"|(?:asm_path:[A-Za-z0-9_/\-]*(?:[ :]+[A-Za-z0-9_/\-]+){0,2})",
                r"|(?:secret_path:[A-Za-z0-9_/]*(?:[ :]+[A-Za-z0-9_/]+)?)",
            ))
            .expect("Invalid reference token regex"),
        }
    }

    /// Find every token in `value`, in order of appearance.
    ///
    /// Fails on the first token that lacks a path or a key.
    pub fn scan<'a>(&self, value: &'a str) -> SecretResult<Vec<ReferenceToken<'a>>> {
        let mut tokens = Vec::new();
        let mut position = 0;

        while let Some(matched) = self.pattern.find_at(value, position) {
            let range = end_before_next_prefix(value, matched.range());
            let text = &value[range.clone()];
            let prefix = text.split(':').next().unwrap_or_default();
            let kind = StoreKind::from_prefix(prefix).ok_or_else(|| SecretError::MalformedToken {
                token: text.to_string(),
                reason: "unknown reference prefix".to_string(),
            })?;

            position = range.end;
            tokens.push(parse_token(kind, text, range)?);
        }

        Ok(tokens)
    }
}

/// Cut a match short where a later component starts another reference
/// (`<prefix>:`), so that reference is scanned as a token of its own.
fn end_before_next_prefix(value: &str, range: Range<usize>) -> Range<usize> {
    let text = &value[range.clone()];
    let bytes = text.as_bytes();
    // The path component directly after the prefix colon is never cut
    let first_check = text.find(':').map_or(text.len(), |colon| colon + 2);

    for i in first_check..bytes.len() {
        let component_start = DELIMITERS.contains(&(bytes[i - 1] as char))
            && !DELIMITERS.contains(&(bytes[i] as char));

        if component_start && starts_with_prefix(&value[range.start + i..]) {
            let kept = text[..i].trim_end_matches(DELIMITERS);
            return range.start..range.start + kept.len();
        }
    }

    range
}

fn starts_with_prefix(rest: &str) -> bool {
    StoreKind::ALL.iter().any(|kind| {
        rest.strip_prefix(kind.prefix())
            .is_some_and(|tail| tail.starts_with(':'))
    })
}

fn parse_token(
    kind: StoreKind,
    text: &str,
    range: Range<usize>,
) -> SecretResult<ReferenceToken<'_>> {
    let body = &text[kind.prefix().len() + 1..];
    let components: Vec<&str> = body
        .split(DELIMITERS)
        .filter(|component| !component.is_empty())
        .collect();

    match components[..] {
        [path, key] => Ok(ReferenceToken {
            kind,
            text,
            range,
            path,
            key,
            subkey: None,
        }),
        [path, key, subkey] if kind.accepts_subkey() => Ok(ReferenceToken {
            kind,
            text,
            range,
            path,
            key,
            subkey: Some(subkey),
        }),
        _ => Err(SecretError::MalformedToken {
            token: text.to_string(),
            reason: if kind.accepts_subkey() {
                format!("expected {}:<path> <key>[ <subkey>]", kind.prefix())
            } else {
                format!("expected {}:<path> <key>", kind.prefix())
            },
        }),
    }
}
