//! `sweep watch` command implementation

use anyhow::{bail, Context as _, Result};
use clap::Args;
use std::time::Duration;
use tracing::info;

use super::Context;
use crate::sweep::{self, InFlight};
use crate::vault::Vault;
use crate::watch::{drain_notices, watch_note};

#[derive(Args)]
pub struct WatchArgs {
    /// Quiet period after each sweep, in milliseconds (overrides config)
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Sweep once before waiting for changes
    #[arg(long)]
    initial: bool,
}

pub async fn run(ctx: &Context, args: WatchArgs) -> Result<()> {
    let task_note_path = ctx.config.task_note_path.as_str();
    if ctx.vault.resolve(task_note_path).is_none() {
        bail!(
            "Task note '{}' not found in {}. Set it with: sweep config set-task-note <path>",
            super::display_path(task_note_path),
            ctx.vault_root().display()
        );
    }

    let settle = Duration::from_millis(args.settle_ms.unwrap_or(ctx.config.watch.settle_ms));
    let in_flight = InFlight::new();

    if args.initial {
        if let Some(_guard) = in_flight.try_acquire() {
            sweep_and_print(ctx);
        }
    }

    let note = ctx.vault.full_path(task_note_path);
    let (watcher, mut rx) =
        watch_note(&note).with_context(|| format!("Failed to watch {}", note.display()))?;

    println!("Watching {} (Ctrl-C to stop)", watcher.note().display());

    tokio::select! {
        runs = drain_notices(&mut rx, &in_flight, settle, |notice| {
            info!("Change detected in {}", notice.path.display());
            sweep_and_print(ctx);
        }) => {
            info!(runs, "Watcher closed");
        }
        _ = tokio::signal::ctrl_c() => {
            println!("Stopped watching");
        }
    }

    Ok(())
}

/// Sweep and print the outcome; failures are logged by the sweep itself
fn sweep_and_print(ctx: &Context) {
    if let Ok(report) = sweep::sweep(&ctx.vault, &ctx.config) {
        if report.migrated > 0 {
            println!("{}", super::run::summary(&report));
        }
    }
}
