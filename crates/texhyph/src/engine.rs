#![forbid(unsafe_code)]

//! Liang's hyphenation algorithm over a [`PatternStore`].
//!
//! # Architecture
//!
//! ```text
//! word → trim → too short? → cache hit?
//!      → lowercase, wrap with '.' delimiters
//!      → look up every substring in the store
//!      → keep the max value at each inter-character gap
//!      → odd value inside the margins = syllable boundary
//!      → merge a one-letter leading syllable, cache, return
//! ```
//!
//! The algorithm is deterministic: the same patterns and the same word
//! always give the same split, and concatenating the syllables yields the
//! trimmed input.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cache::{CachePolicy, CacheStats, WordCache};
use crate::fold;
use crate::pattern::BOUNDARY;
use crate::store::PatternStore;

/// Minimum characters before the first hyphen.
pub const DEFAULT_LEFT_MARGIN: usize = 1;
/// Minimum characters after the last hyphen.
pub const DEFAULT_RIGHT_MARGIN: usize = 2;

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub left_margin: usize,
    pub right_margin: usize,
    pub cache: CachePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            left_margin: DEFAULT_LEFT_MARGIN,
            right_margin: DEFAULT_RIGHT_MARGIN,
            cache: CachePolicy::Unbounded,
        }
    }
}

/// Inputs returned verbatim: the empty string, a lone em or en dash, and
/// anything containing a space.
#[must_use]
pub fn is_display_token(word: &str) -> bool {
    word.is_empty() || word == "\u{2014}" || word == "\u{2013}" || word.contains(' ')
}

/// Splits words into syllables using one pattern store and one word cache.
///
/// Both are owned by the engine and live as long as it does. All methods
/// take `&self`; the engine can be shared between threads behind an `Arc`.
#[derive(Debug)]
pub struct HyphenationEngine {
    store: PatternStore,
    cache: WordCache,
    config: EngineConfig,
}

impl HyphenationEngine {
    #[must_use]
    pub fn new(store: PatternStore) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(store: PatternStore, config: EngineConfig) -> Self {
        Self {
            store,
            cache: WordCache::with_policy(config.cache),
            config,
        }
    }

    /// Set custom left/right margins.
    #[must_use]
    pub fn with_margins(mut self, left: usize, right: usize) -> Self {
        self.config.left_margin = left;
        self.config.right_margin = right;
        self
    }

    /// Replace the word cache, dropping anything cached so far.
    #[must_use]
    pub fn with_cache(mut self, policy: CachePolicy) -> Self {
        self.config.cache = policy;
        self.cache = WordCache::with_policy(policy);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    #[must_use]
    pub fn cache(&self) -> &WordCache {
        &self.cache
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Split a word into syllables.
    ///
    /// Never fails. Display tokens and words of at most
    /// `left_margin + right_margin` characters come back as a single
    /// syllable. Otherwise a hyphen goes before character `i` when
    /// `left_margin <= i <= len - right_margin` and the score at that gap is
    /// odd. A leading syllable of one character is merged into the next.
    #[must_use]
    pub fn syllables(&self, word: &str) -> Vec<String> {
        if is_display_token(word) {
            return vec![word.to_string()];
        }

        let word = word.trim();
        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= self.config.left_margin + self.config.right_margin {
            return vec![word.to_string()];
        }

        if let Some(cached) = self.cache.get(word) {
            return cached;
        }

        let scores = self.score_chars(&chars);
        let mut syllables = split_at_odd_scores(
            &chars,
            &scores,
            self.config.left_margin,
            self.config.right_margin,
        );
        merge_leading_letter(&mut syllables);

        self.cache.add(word, &syllables);
        syllables
    }

    /// Split each word, keyed by the word as given.
    ///
    /// Repeated words collapse into one entry holding the result of the last
    /// occurrence.
    #[must_use]
    pub fn syllables_for_words<I, S>(&self, words: I) -> FxHashMap<String, Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = FxHashMap::default();
        for word in words {
            let word = word.as_ref();
            results.insert(word.to_string(), self.syllables(word));
        }
        results
    }

    /// Score vector of the trimmed word.
    ///
    /// Entry `i` is the value at the gap before character `i`; the vector
    /// also carries the gap after the last character and the gap after the
    /// trailing delimiter, so it has `len + 2` entries.
    #[must_use]
    pub fn scores(&self, word: &str) -> Vec<u32> {
        let chars: Vec<char> = word.trim().chars().collect();
        self.score_chars(&chars)
    }

    fn score_chars(&self, chars: &[char]) -> Vec<u32> {
        // Wrap with delimiters: ".word."
        let mut delimited: Vec<char> = Vec::with_capacity(chars.len() + 2);
        delimited.push(BOUNDARY);
        delimited.extend(chars.iter().map(|&ch| fold::lower_char(ch)));
        delimited.push(BOUNDARY);

        // One value per gap of the delimited word.
        let mut values = vec![0u32; delimited.len() + 1];
        let max_key = self.store.max_key_chars();
        let mut key = String::with_capacity(max_key * 4);

        for start in 0..delimited.len() {
            key.clear();
            for &ch in delimited[start..].iter().take(max_key) {
                key.push(ch);
                let Some(pattern) = self.store.lookup(&key) else {
                    continue;
                };
                // Pattern starts at `start`, so value k lands on gap start + k.
                for (k, &value) in pattern.values().iter().enumerate() {
                    if let Some(slot) = values.get_mut(start + k) {
                        *slot = (*slot).max(value);
                    }
                }
            }
        }

        // Drop the gap before the leading delimiter so index i is the gap
        // before chars[i].
        values.remove(0);
        values
    }
}

fn split_at_odd_scores(chars: &[char], scores: &[u32], left: usize, right: usize) -> Vec<String> {
    let first_break = left.max(1);
    let last_break = chars.len().saturating_sub(right);

    let mut syllables = Vec::new();
    let mut current = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        if i >= first_break && i <= last_break && scores[i] % 2 == 1 {
            syllables.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    syllables.push(current);
    syllables
}

/// A single leading letter is never shown as its own syllable.
fn merge_leading_letter(syllables: &mut Vec<String>) {
    if syllables.len() > 1 && syllables[0].chars().count() == 1 {
        let first = syllables.remove(0);
        syllables[0].insert_str(0, &first);
    }
}
