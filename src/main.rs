//! sweep - Moves completed checklist tasks out of a task note

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use note_sweep::cli::{self, Cli, Commands, Context};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = if std::env::var("NOTE_SWEEP_DEBUG").is_ok() {
        "debug"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("note_sweep={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Completion needs neither settings nor a vault
    if let Commands::Completion { shell } = cli.command {
        generate(shell, &mut Cli::command(), "sweep", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = Context::load(&cli)?;

    match cli.command {
        Commands::Run(args) => cli::run::run(&ctx, args).await,
        Commands::Watch(args) => cli::watch::run(&ctx, args).await,
        Commands::Files(args) => cli::files::run(&ctx, args).await,
        Commands::Config { command } => cli::settings::run(ctx, command).await,
        Commands::Completion { .. } => unreachable!(),
    }
}
