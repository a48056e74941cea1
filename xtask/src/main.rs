//! xtask - Development tasks for note-sweep

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use note_sweep::config::Config;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for note-sweep")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CLI documentation from clap definitions
    GenDocs,

    /// Write a sample vault to try `sweep` against
    DemoVault {
        /// Directory to create
        #[arg(default_value = "target/demo-vault")]
        dir: PathBuf,
    },
}

const DEMO_TASKS: &str = "# Tasks

```button
name Sweep completed tasks
type command
action Sweep: Move completed tasks
```

- [ ] **Write weekly report
    - [x] collect numbers
    - [x] draft summary
- [ ] **Plan offsite
    - [x] pick dates
    - [ ] book venue
- [x] **Renew domain
";

const DEMO_DONE: &str = "# Done
";

fn main() -> Result<()> {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs => generate_cli_docs(),
        Commands::DemoVault { dir } => write_demo_vault(&dir),
    }
}

fn generate_cli_docs() -> Result<()> {
    let markdown = clap_markdown::help_markdown::<note_sweep::cli::Cli>();

    let docs_dir = Path::new("docs/cli");
    fs::create_dir_all(docs_dir).context("Failed to create docs/cli directory")?;

    let output_path = docs_dir.join("reference.md");
    fs::write(&output_path, markdown).context("Failed to write CLI reference")?;

    println!("Generated CLI documentation at {}", output_path.display());
    Ok(())
}

fn write_demo_vault(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    fs::write(dir.join("Tasks.md"), DEMO_TASKS)?;
    fs::write(dir.join("Done.md"), DEMO_DONE)?;

    let config = Config {
        vault_root: Some(dir.to_path_buf()),
        task_note_path: "Tasks.md".to_string(),
        new_note_path: "Done.md".to_string(),
        ..Default::default()
    };
    let config_path = dir.join("sweep.toml");
    config.save_to(&config_path)?;

    println!("Wrote demo vault to {}", dir.display());
    println!(
        "Try: cargo run -- --config {} run --dry-run",
        config_path.display()
    );
    Ok(())
}
