use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;
pub const CONFIG_ENV: &str = "TONEARM_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub version: u32,
    pub music_root: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            music_root: "".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {}", err),
            ConfigError::Yaml(err) => write!(f, "yaml error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

/// `TONEARM_CONFIG` if set, else `config.yaml` beside the executable.
pub fn config_path_from_env() -> PathBuf {
    if let Ok(value) = env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return PathBuf::from(value);
        }
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("config.yaml")))
        .unwrap_or_else(|| PathBuf::from("config.yaml"))
}

/// Reads the config at `path`, or writes the defaults there. The flag is
/// `true` when the file was created.
pub fn load_or_create_config(path: &Path) -> Result<(BridgeConfig, bool), ConfigError> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        let mut config: BridgeConfig = serde_yaml::from_str(&contents)?;
        config.version = config.version.max(CONFIG_VERSION);
        return Ok((config, false));
    }

    let config = BridgeConfig::default();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(&config)?)?;
    Ok((config, true))
}

/// The configured music root; relative values resolve against the config
/// file's directory. `None` when unset.
pub fn resolve_music_root(config_path: &Path, value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let raw = PathBuf::from(trimmed);
    if raw.is_absolute() {
        return Some(raw);
    }
    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some(base.join(raw))
}
