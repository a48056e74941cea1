//! CLI command implementations

pub mod definition;
pub mod files;
pub mod run;
pub mod settings;
pub mod watch;

pub use definition::{Cli, Commands};

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::vault::FsVault;

/// Settings and vault shared by every command
pub struct Context {
    pub config_path: PathBuf,
    pub config: Config,
    pub vault: FsVault,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => config::config_path()?,
        };
        let config = Config::load_from(&config_path)
            .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

        let root = match &cli.vault {
            Some(root) => root.clone(),
            None => {
                let cwd = std::env::current_dir().context("Cannot determine working directory")?;
                config.vault_root_or(&cwd)
            }
        };

        Ok(Self {
            config_path,
            config,
            vault: FsVault::new(root),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.config
            .save_to(&self.config_path)
            .with_context(|| format!("Failed to save settings to {}", self.config_path.display()))
    }

    pub fn vault_root(&self) -> &Path {
        self.vault.root()
    }
}

/// Show a configured path, or a placeholder when it is empty
pub fn display_path(path: &str) -> &str {
    if path.trim().is_empty() {
        "(not set)"
    } else {
        path
    }
}

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(""), "(not set)");
        assert_eq!(display_path("  "), "(not set)");
        assert_eq!(display_path("Tasks.md"), "Tasks.md");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "task"), "0 tasks");
        assert_eq!(plural(1, "task"), "1 task");
        assert_eq!(plural(2, "task"), "2 tasks");
    }

    #[test]
    fn test_context_prefers_cli_vault_over_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        Config {
            vault_root: Some(PathBuf::from("/from/config")),
            ..Default::default()
        }
        .save_to(&config_path)
        .unwrap();

        let config_arg = config_path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "sweep",
            "run",
            "--config",
            config_arg.as_str(),
            "--vault",
            "/from/cli",
        ])
        .unwrap();
        let ctx = Context::load(&cli).unwrap();
        assert_eq!(ctx.vault_root(), Path::new("/from/cli"));

        let cli = Cli::try_parse_from(["sweep", "run", "--config", config_arg.as_str()]).unwrap();
        let ctx = Context::load(&cli).unwrap();
        assert_eq!(ctx.vault_root(), Path::new("/from/config"));
    }
}
