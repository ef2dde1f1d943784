#![forbid(unsafe_code)]

//! TeX hyphenation patterns.
//!
//! A raw pattern interleaves hyphenation values with the characters of a
//! word fragment. For example `"hy3p"` means: between `y` and `p` the value
//! is 3. Odd values allow a hyphen, even values forbid one, and a higher
//! value at the same gap overrides a lower one.
//!
//! ```text
//! "hy3p"    → key "hyp",   values [0, 0, 3, 0]
//! ".ab4c"   → key ".abc",  values [0, 0, 0, 4, 0]
//! "2ph"     → key "ph",    values [2, 0, 0]
//! "a12b"    → key "ab",    values [0, 12, 0]
//! ```

use std::fmt;

use crate::error::{HyphenError, Result};

/// Marks the start or end of a word inside a pattern key.
pub const BOUNDARY: char = '.';

/// A parsed hyphenation pattern.
///
/// `values` always holds one more entry than the key has characters: index 0
/// is the gap before the first character, index `n` the gap after the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    key: String,
    key_len: usize,
    values: Vec<u32>,
}

impl Pattern {
    /// Parse a raw TeX pattern, surrounding whitespace allowed.
    ///
    /// Fails with [`HyphenError::InvalidPattern`] unless [`Pattern::is_valid`]
    /// accepts the string.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !Self::is_valid(trimmed) {
            return Err(HyphenError::invalid(trimmed));
        }

        let key = Self::create_key(trimmed)?;
        let values = Self::create_values(trimmed);
        let key_len = key.chars().count();
        debug_assert_eq!(values.len(), key_len + 1);

        Ok(Self {
            key,
            key_len,
            values,
        })
    }

    /// Check a raw pattern against the structural rules.
    ///
    /// With digits removed the pattern must be non-empty, free of whitespace,
    /// not made only of boundary markers, and may carry a boundary marker only
    /// as its first or last character. Which letters are allowed is left to
    /// the pattern source, since it differs between languages.
    ///
    /// Whitespace is checked before the final trim, so `a 1` is rejected
    /// even though its trimmed key `a` would look valid: the space would
    /// still take a value slot and misalign the values with the key.
    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        let stripped = strip_digits(raw.trim());
        let letters = stripped.trim();

        if letters.is_empty() {
            return false;
        }
        if stripped.chars().any(char::is_whitespace) {
            return false;
        }
        if letters.chars().all(|c| c == BOUNDARY) {
            return false;
        }

        let last = letters.chars().count() - 1;
        letters
            .chars()
            .enumerate()
            .all(|(i, c)| c != BOUNDARY || i == 0 || i == last)
    }

    /// Derive the lookup key of a raw pattern: digits removed, trimmed.
    ///
    /// Performs no validation beyond rejecting an empty key, so lazy stores
    /// can index patterns without parsing them.
    pub fn create_key(raw: &str) -> Result<String> {
        let trimmed = raw.trim();
        let key = strip_digits(trimmed);
        let key = key.trim();

        if key.is_empty() {
            return Err(HyphenError::EmptyKey {
                raw: trimmed.to_string(),
            });
        }
        Ok(key.to_string())
    }

    /// Compute the value vector of a raw pattern.
    ///
    /// Consecutive digits accumulate into one multi-digit value; every
    /// non-digit character moves on to the next gap.
    #[must_use]
    pub fn create_values(raw: &str) -> Vec<u32> {
        let trimmed = raw.trim();
        let letters = trimmed.chars().filter(|c| !c.is_ascii_digit()).count();
        let mut values = vec![0u32; letters + 1];

        let mut j = 0;
        for ch in trimmed.chars() {
            match ch.to_digit(10) {
                Some(digit) => {
                    values[j] = values[j].saturating_mul(10).saturating_add(digit);
                }
                None => j += 1,
            }
        }
        values
    }

    /// Rebuild a pattern from an already split key and value vector.
    ///
    /// Returns `None` when the parts could not have come from [`Pattern::parse`].
    #[must_use]
    pub fn from_parts(key: String, values: Vec<u32>) -> Option<Self> {
        if key.chars().any(|c| c.is_ascii_digit()) || !Self::is_valid(&key) || key.trim() != key
        {
            return None;
        }
        let key_len = key.chars().count();
        if values.len() != key_len + 1 {
            return None;
        }
        Some(Self {
            key,
            key_len,
            values,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Hyphenation value at gap `index`, if it exists.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Number of characters in the key, boundary markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.key_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_len == 0
    }
}

/// Renders the pattern back in TeX notation, omitting zero values.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.key.chars();
        for &value in &self.values {
            if value != 0 {
                write!(f, "{value}")?;
            }
            if let Some(ch) = chars.next() {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

fn strip_digits(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_ascii_digit()).collect()
}
