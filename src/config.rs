use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".gurutextrc.json";

/// Marker that excludes a call when found in the comment above it.
pub const DEFAULT_IGNORE_MARKER: &str = "GURUTEXT_IGNORE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Comment selection prefix. Empty disables comment extraction.
    #[serde(default)]
    pub comment: String,
    #[serde(default = "default_ignore")]
    pub ignore: String,
    /// Regex matched against the file of each call site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(default)]
    pub sort: bool,
    /// Package patterns forwarded to guru's `-scope`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_ignore() -> String {
    DEFAULT_IGNORE_MARKER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment: String::new(),
            ignore: default_ignore(),
            exclude: None,
            sort: false,
            scope: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `exclude` is not a valid regex.
    pub fn validate(&self) -> Result<()> {
        self.exclude_regex()?;
        Ok(())
    }

    pub fn exclude_regex(&self) -> Result<Option<Regex>> {
        self.exclude
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid regex in 'exclude': \"{}\"", pattern))
            })
            .transpose()
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the configuration came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

/// Load the nearest configuration file above `start_dir`, or the defaults.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        path: Some(path.to_path_buf()),
    })
}
