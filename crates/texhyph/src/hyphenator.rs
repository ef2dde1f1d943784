#![forbid(unsafe_code)]

//! Delimiter-joined output on top of [`HyphenationEngine`].

use rustc_hash::FxHashMap;

use crate::bulgarian;
use crate::engine::{HyphenationEngine, is_display_token};
use crate::error::Result;

pub const DEFAULT_DELIMITER: &str = "-";

/// Hyphenates words into display strings such as `"ду-ма-та"`.
#[derive(Debug)]
pub struct Hyphenator {
    engine: HyphenationEngine,
    delimiter: String,
}

impl Hyphenator {
    #[must_use]
    pub fn new(engine: HyphenationEngine) -> Self {
        Self {
            engine,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Bundled Bulgarian patterns, lazy store, default margins and cache.
    pub fn bulgarian() -> Result<Self> {
        Ok(Self::new(HyphenationEngine::new(bulgarian::store()?)))
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn engine(&self) -> &HyphenationEngine {
        &self.engine
    }

    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Join the syllables of `word` with the delimiter.
    ///
    /// Display tokens come back unchanged. A doubled delimiter, produced when
    /// the word itself contains one at a break, is collapsed.
    #[must_use]
    pub fn hyphenate(&self, word: &str) -> String {
        if is_display_token(word) {
            return word.to_string();
        }

        let joined = self.engine.syllables(word).join(&self.delimiter);
        if self.delimiter.is_empty() {
            return joined;
        }
        joined.replace(&self.delimiter.repeat(2), &self.delimiter)
    }

    /// Hyphenate each word, keyed by the word as given. Repeated words keep
    /// the last result.
    #[must_use]
    pub fn hyphenate_words<I, S>(&self, words: I) -> FxHashMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .map(|word| {
                let word = word.as_ref();
                (word.to_string(), self.hyphenate(word))
            })
            .collect()
    }
}
