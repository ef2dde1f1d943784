//! Length-preserving case folding.
//!
//! Scores are indexed per character of the original word, so folding must
//! map each character to exactly one character. Characters whose case
//! mapping expands (`'ß'` → `"SS"`, `'İ'` → `"i̇"`) are kept as they are.

pub(crate) fn lower_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

pub(crate) fn upper_char(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

pub(crate) fn lower(text: &str) -> String {
    text.chars().map(lower_char).collect()
}

/// Uppercase the first character only.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => std::iter::once(upper_char(first)).chain(chars).collect(),
        None => String::new(),
    }
}
