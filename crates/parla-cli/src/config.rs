//! Settings from flags plus an optional TOML config file.
//!
//! ```toml
//! dir = "locales"      # relative to the config file
//! fallback = "en"
//! locale = "it"
//! ```
//!
//! Flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::GlobalArgs;
use crate::error::CliError;

const DEFAULT_FALLBACK: &str = parla::bundled::FALLBACK_LOCALE;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub dir: Option<PathBuf>,
    pub fallback: Option<String>,
    pub locale: Option<String>,
}

impl FileConfig {
    /// Read and parse a config file. A relative `dir` is resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| CliError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        if let (Some(dir), Some(base)) = (config.dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        Ok(config)
    }
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Resource directory; `None` means the bundled tables.
    pub dir: Option<PathBuf>,
    pub fallback: String,
    /// Locale to activate in place of the environment's.
    pub locale: Option<String>,
}

impl Settings {
    pub fn resolve(args: &GlobalArgs) -> Result<Self, CliError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let settings = Self::merge(args, file);
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    fn merge(args: &GlobalArgs, file: FileConfig) -> Self {
        Self {
            dir: args.dir.clone().or(file.dir),
            fallback: args
                .fallback
                .clone()
                .or(file.fallback)
                .unwrap_or_else(|| DEFAULT_FALLBACK.to_string()),
            locale: file.locale,
        }
    }
}
