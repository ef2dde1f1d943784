//! Turning a pattern file body into raw pattern strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Drop the first line, which carries source information in the
    /// distributed pattern files.
    pub skip_header: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { skip_header: true }
    }
}

/// Raw patterns of a file body, one per non-blank line, in file order.
#[must_use]
pub fn pattern_lines(text: &str, options: SourceOptions) -> Vec<&str> {
    let mut lines = text.lines();
    if options.skip_header {
        lines.next();
    }
    lines.map(str::trim).filter(|line| !line.is_empty()).collect()
}
