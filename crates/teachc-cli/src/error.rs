//! CLI-level error type. Everything below this crate returns data or a
//! typed error; this is the one place those errors become a message a user
//! reads and a process exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadSource { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Config { path: PathBuf, source: toml::de::Error },

    #[error(transparent)]
    Pipeline(#[from] teachc_driver::TeachcError),
}

pub type Result<T> = std::result::Result<T, CliError>;
