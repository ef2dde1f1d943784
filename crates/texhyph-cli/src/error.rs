use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Stdout(#[from] std::io::Error),

    #[error("hyphenation error: {0}")]
    Hyphen(#[from] texhyph::HyphenError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }

    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
