use thiserror::Error;

pub type Result<T> = std::result::Result<T, HyphenError>;

/// Errors raised while building or persisting hyphenation data.
///
/// Scoring a word never fails; every variant here belongs to a
/// construction or serialization call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HyphenError {
    #[error("pattern \u{201c}{raw}\u{201d} is invalid")]
    InvalidPattern { raw: String },

    #[error("empty key for pattern \u{201c}{raw}\u{201d}")]
    EmptyKey { raw: String },

    #[error("cannot build a pattern store from an empty pattern set")]
    EmptyPatternSet,

    #[error("corrupt pattern store: {reason}")]
    CorruptStore { reason: String },

    #[error("could not serialize pattern store: {reason}")]
    Serialization { reason: String },
}

impl HyphenError {
    #[must_use]
    pub fn invalid(raw: impl Into<String>) -> Self {
        Self::InvalidPattern { raw: raw.into() }
    }

    #[must_use]
    pub fn corrupt(reason: impl ToString) -> Self {
        Self::CorruptStore {
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn serialization(reason: impl ToString) -> Self {
        Self::Serialization {
            reason: reason.to_string(),
        }
    }
}
