#![forbid(unsafe_code)]

//! Command-line front end for `texhyph`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod util;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
