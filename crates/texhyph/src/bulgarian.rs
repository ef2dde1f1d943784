//! Built-in minimal Bulgarian patterns.
//!
//! A small representative subset in the style of `hyph_bg_BG.tex`: a break
//! after every vowel, `й` kept with the preceding vowel, and the common
//! consonant clusters split down the middle. Sufficient for common words and
//! testing. Production use should load the full pattern file.

use crate::error::Result;
use crate::source::{SourceOptions, pattern_lines};
use crate::store::{PatternStore, StoreOptions};

/// The bundled pattern file, header line included.
pub const BULGARIAN_PATTERNS_MINI: &str = include_str!("../data/hyph_bg_mini.tex");

/// Raw patterns of the bundled file, header stripped.
#[must_use]
pub fn patterns() -> Vec<&'static str> {
    pattern_lines(BULGARIAN_PATTERNS_MINI, SourceOptions::default())
}

/// A lazy, sorted store over the bundled patterns.
pub fn store() -> Result<PatternStore> {
    PatternStore::from_patterns(patterns(), StoreOptions::lazy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_patterns_are_all_valid() {
        let patterns = patterns();
        assert!(!patterns.is_empty());
        assert!(patterns.iter().all(|p| crate::Pattern::is_valid(p)));
        assert!(!patterns.iter().any(|p| p.starts_with('%')));
    }

    #[test]
    fn bundled_store_has_no_duplicate_keys() {
        let store = store().unwrap();
        assert_eq!(store.len(), patterns().len());
        assert_eq!(store.materialize_all(), 0);
    }
}
