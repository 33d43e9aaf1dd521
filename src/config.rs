//! User configuration.
//!
//! An optional JSON file supplies defaults that the command line extends:
//! the template root, flags and libraries selected on every run, and whether
//! to initialize a repository.
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Current schema version for `config.json`.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
/// Environment variable that points at a config file.
pub const CONFIG_ENV: &str = "PMAKER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub default_flags: Vec<String>,
    #[serde(default)]
    pub default_libs: Vec<String>,
    #[serde(default)]
    pub git: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            templates_dir: None,
            default_flags: Vec::new(),
            default_libs: Vec::new(),
            git: false,
        }
    }
}

/// Default location: `<config dir>/pmaker/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pmaker").join("config.json"))
}

/// Load the config at `explicit`, `PMAKER_CONFIG`, or the default location.
///
/// A missing file at the default location yields defaults; an explicitly
/// named file must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<UserConfig> {
    if let Some(path) = explicit {
        return load_config_file(path, true);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return load_config_file(Path::new(&path), true);
    }
    match default_config_path() {
        Some(path) => load_config_file(&path, false),
        None => Ok(UserConfig::default()),
    }
}

/// Parse and validate one config file.
pub fn load_config_file(path: &Path, required: bool) -> Result<UserConfig> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(UserConfig::default());
        }
        Err(err) => return Err(ScaffoldError::io("read config", path, err)),
    };
    let config: UserConfig = serde_json::from_slice(&bytes).map_err(|err| ScaffoldError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    validate_config(&config).map_err(|message| ScaffoldError::Config {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn validate_config(config: &UserConfig) -> std::result::Result<(), String> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(format!(
            "unsupported schema_version {} (expected {CONFIG_SCHEMA_VERSION})",
            config.schema_version
        ));
    }
    if let Some(dir) = &config.templates_dir {
        if dir.as_os_str().is_empty() {
            return Err("templates_dir must be non-empty".to_string());
        }
    }
    for name in config.default_flags.iter().chain(&config.default_libs) {
        if name.trim().is_empty() || name.contains(',') {
            return Err(format!("invalid flag or library name {name:?}"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
