//! `sweep config` subcommands implementation

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use super::{display_path, Context};
use crate::vault::Vault;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Print the settings file location
    Path,

    /// Set the note holding the tasks
    SetTaskNote {
        /// Vault path of the note (see `sweep files`)
        path: String,
    },

    /// Set the note completed tasks are moved to
    SetNewNote {
        /// Vault path of the note (see `sweep files`)
        path: String,
    },

    /// Set the vault directory
    SetVault {
        /// Directory the note paths are relative to
        path: PathBuf,
    },
}

pub async fn run(mut ctx: Context, command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show => show(&ctx),
        SettingsCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
        SettingsCommands::SetTaskNote { path } => {
            warn_if_missing(&ctx, &path);
            ctx.config.task_note_path = path;
            ctx.save()?;
            println!("✓ Task note: {}", display_path(&ctx.config.task_note_path));
            Ok(())
        }
        SettingsCommands::SetNewNote { path } => {
            warn_if_missing(&ctx, &path);
            ctx.config.new_note_path = path;
            ctx.save()?;
            println!("✓ New note: {}", display_path(&ctx.config.new_note_path));
            Ok(())
        }
        SettingsCommands::SetVault { path } => {
            if !path.is_dir() {
                eprintln!("Warning: {} is not a directory", path.display());
            }
            ctx.config.vault_root = Some(path);
            ctx.save()?;
            if let Some(root) = &ctx.config.vault_root {
                println!("✓ Vault: {}", root.display());
            }
            Ok(())
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    let status = |path: &str| {
        if ctx.vault.resolve(path).is_some() {
            ""
        } else {
            " (missing)"
        }
    };

    println!("Settings: {}", ctx.config_path.display());
    println!("  Vault:      {}", ctx.vault_root().display());
    println!(
        "  Task note:  {}{}",
        display_path(&ctx.config.task_note_path),
        status(&ctx.config.task_note_path)
    );
    println!(
        "  New note:   {}{}",
        display_path(&ctx.config.new_note_path),
        status(&ctx.config.new_note_path)
    );
    println!("  Settle:     {}ms", ctx.config.watch.settle_ms);
    Ok(())
}

/// The path is saved regardless; a sweep reports it again if still missing
fn warn_if_missing(ctx: &Context, path: &str) {
    if ctx.vault.resolve(path).is_none() {
        eprintln!(
            "Warning: '{}' does not exist in {}",
            path,
            ctx.vault_root().display()
        );
    }
}
