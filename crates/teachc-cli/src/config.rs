//! `teachc.toml` loading: discovered in the current directory first, then
//! `$XDG_CONFIG_HOME/teachc/`. Every field is optional — CLI flags always
//! take precedence over whatever a config file sets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules_file: Option<PathBuf>,
    pub grammar_file: Option<PathBuf>,
    pub lr_mode: Option<String>,
}

impl Config {
    /// Look in the current directory, then the XDG config directory, for a
    /// `teachc.toml`. Returns the default (empty) config if neither exists.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn find_config_file() -> Option<PathBuf> {
    let cwd_candidate = PathBuf::from("teachc.toml");
    if cwd_candidate.is_file() {
        return Some(cwd_candidate);
    }
    let xdg_candidate = dirs::config_dir()?.join("teachc").join("teachc.toml");
    xdg_candidate.is_file().then_some(xdg_candidate)
}
