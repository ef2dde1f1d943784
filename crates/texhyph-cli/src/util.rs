use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Suffix appended to a word list's path to name its output.
pub const OUTPUT_SUFFIX: &str = ".hyphenated";

pub fn read_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::io(path, source))
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CliError::io(path, source))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| CliError::io(path, source))
}

pub fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|source| CliError::io(path, source))
}

/// `words.txt` becomes `words.txt.hyphenated`.
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}
