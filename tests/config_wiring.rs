//! Integration tests for config wiring
//!
//! These tests verify that settings saved to the default location are what
//! the CLI context and the sweep pick up.

use anyhow::Result;
use clap::Parser;
use note_sweep::cli::{Cli, Context};
use note_sweep::config::{config_path, load_config, save_config, Config};
use note_sweep::sweep;
use serial_test::serial;
use std::fs;

fn setup_temp_home() -> tempfile::TempDir {
    let temp = tempfile::TempDir::new().unwrap();
    std::env::set_var("HOME", temp.path());
    #[cfg(target_os = "linux")]
    std::env::set_var("XDG_CONFIG_HOME", temp.path().join(".config"));
    temp
}

#[test]
#[serial]
fn test_missing_config_loads_defaults() -> Result<()> {
    let _temp = setup_temp_home();

    let config = load_config()?;
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
#[serial]
fn test_saved_config_is_loaded() -> Result<()> {
    let temp = setup_temp_home();

    let config = Config {
        task_note_path: "Tasks.md".to_string(),
        new_note_path: "Done.md".to_string(),
        ..Default::default()
    };
    save_config(&config)?;

    assert!(config_path()?.starts_with(temp.path()));
    assert_eq!(load_config()?, config);
    Ok(())
}

#[test]
#[serial]
fn test_context_sweeps_configured_vault() -> Result<()> {
    let temp = setup_temp_home();
    let vault_dir = temp.path().join("notes");
    fs::create_dir(&vault_dir)?;
    fs::write(vault_dir.join("Tasks.md"), "- [ ] **A\n    - [x] a\n")?;
    fs::write(vault_dir.join("Done.md"), "")?;

    save_config(&Config {
        vault_root: Some(vault_dir.clone()),
        task_note_path: "Tasks.md".to_string(),
        new_note_path: "Done.md".to_string(),
        ..Default::default()
    })?;

    let cli = Cli::try_parse_from(["sweep", "run"])?;
    let ctx = Context::load(&cli)?;
    assert_eq!(ctx.vault_root(), vault_dir.as_path());

    let report = sweep::sweep(&ctx.vault, &ctx.config)?;
    assert_eq!(report.migrated, 1);
    assert_eq!(
        fs::read_to_string(vault_dir.join("Done.md"))?,
        "- [x] **A\n    - [x] a"
    );
    Ok(())
}
