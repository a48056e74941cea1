//! CLI argument definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::files::FilesArgs;
use super::run::RunArgs;
use super::settings::SettingsCommands;
use super::watch::WatchArgs;

#[derive(Parser)]
#[command(name = "sweep")]
#[command(version)]
#[command(about = "Move completed checklist tasks from a task note into a done note")]
#[command(
    long_about = "sweep - Moves finished tasks out of a task note.\n\nA task is a line like '- [ ] **Title' followed by sub-steps indented four\nspaces ('    - [x] step'). Once every sub-step is checked, the whole task is\nappended to the new note with all of its boxes ticked. ```button blocks are\nleft untouched."
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "NOTE_SWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Vault directory note paths are relative to
    #[arg(long, global = true, env = "NOTE_SWEEP_VAULT")]
    pub vault: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move completed tasks once
    Run(RunArgs),

    /// Move completed tasks whenever the task note changes
    Watch(WatchArgs),

    /// List note paths available in the vault
    #[command(alias = "ls")]
    Files(FilesArgs),

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_global_flags() {
        let cli = Cli::try_parse_from(["sweep", "run", "--dry-run", "--vault", "/notes", "-vv"])
            .unwrap();
        assert_eq!(cli.vault, Some(PathBuf::from("/notes")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["sweep", "config", "set-task-note", "Tasks.md"]).unwrap();
        match cli.command {
            Commands::Config {
                command: SettingsCommands::SetTaskNote { path },
            } => assert_eq!(path, "Tasks.md"),
            _ => panic!("expected config set-task-note"),
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["sweep"]).is_err());
    }
}
