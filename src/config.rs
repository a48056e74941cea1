//! User configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "note-sweep";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot find config directory")]
    NoConfigDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory both note paths are relative to (defaults to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_root: Option<PathBuf>,

    /// Note holding the checklist tasks
    #[serde(default)]
    pub task_note_path: String,

    /// Note completed tasks are appended to
    #[serde(default)]
    pub new_note_path: String,

    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Quiet period after a sweep during which change events are dropped
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_settle_ms() -> u64 {
    500
}

/// Per-user application directory, created on first use
pub fn get_app_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join(APP_DIR_NAME);
    fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join(CONFIG_FILE))
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Vault root, resolved against the working directory when unset
    pub fn vault_root_or(&self, cwd: &Path) -> PathBuf {
        match &self.vault_root {
            Some(root) => expand_home(root),
            None => cwd.to_path_buf(),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

pub fn load_config() -> Result<Config> {
    Config::load_from(&config_path()?)
}

pub fn save_config(config: &Config) -> Result<()> {
    config.save_to(&config_path()?)
}
