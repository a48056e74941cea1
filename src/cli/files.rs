//! `sweep files` command implementation

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;

use super::Context;
use crate::vault::Vault;

#[derive(Args)]
pub struct FilesArgs {
    /// Only list markdown notes
    #[arg(long)]
    markdown: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FileJson<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
}

fn role(ctx: &Context, path: &str) -> Option<&'static str> {
    if path == ctx.config.task_note_path {
        Some("task note")
    } else if path == ctx.config.new_note_path {
        Some("new note")
    } else {
        None
    }
}

pub async fn run(ctx: &Context, args: FilesArgs) -> Result<()> {
    let mut paths = ctx
        .vault
        .list_paths()
        .with_context(|| format!("Failed to list {}", ctx.vault_root().display()))?;

    if args.markdown {
        paths.retain(|p| p.ends_with(".md"));
    }

    if args.json {
        let files: Vec<FileJson> = paths
            .iter()
            .map(|p| FileJson {
                path: p,
                role: role(ctx, p),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if paths.is_empty() {
        println!("No files found in {}", ctx.vault_root().display());
        return Ok(());
    }

    for path in &paths {
        match role(ctx, path) {
            Some(role) => println!("  * {} ({})", path, role),
            None => println!("    {}", path),
        }
    }
    println!("\nTotal: {} files", paths.len());

    Ok(())
}
