//! Free-text input normalization shared by forms and renderers.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Trims a single-line value and collapses inner whitespace runs to one space.
///
/// Used for names, titles, categories and locations, where a stray newline or
/// tab from a paste should not survive into the stored value.
pub fn normalize_line(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Trims a multi-line value, keeping its inner line structure.
pub fn normalize_block(raw: &str) -> String {
    raw.trim().to_string()
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
