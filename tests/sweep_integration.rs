//! Integration tests for sweeping task notes stored on disk

use anyhow::Result;
use note_sweep::config::Config;
use note_sweep::sweep::{self, SweepError};
use note_sweep::vault::FsVault;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_vault(task_note: &str, new_note: &str) -> Result<(TempDir, FsVault, Config)> {
    let temp = TempDir::new()?;
    fs::create_dir(temp.path().join("Archive"))?;
    fs::write(temp.path().join("Tasks.md"), task_note)?;
    fs::write(temp.path().join("Archive/Done.md"), new_note)?;

    let vault = FsVault::new(temp.path());
    let config = Config {
        task_note_path: "Tasks.md".to_string(),
        new_note_path: "Archive/Done.md".to_string(),
        ..Default::default()
    };
    Ok((temp, vault, config))
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

#[test]
fn test_completed_task_moves_to_new_note() -> Result<()> {
    let (temp, vault, config) = setup_vault(
        "- [ ] **Task 1
    - [x] step a
    - [x] step b
- [ ] **Task 2
    - [x] step a
    - [ ] step b
",
        "",
    )?;

    let report = sweep::sweep(&vault, &config)?;

    assert_eq!(report.migrated, 1);
    assert_eq!(report.retained, 1);
    assert_eq!(
        read(temp.path(), "Tasks.md"),
        "- [ ] **Task 2\n    - [x] step a\n    - [ ] step b"
    );
    assert_eq!(
        read(temp.path(), "Archive/Done.md"),
        "- [x] **Task 1\n    - [x] step a\n    - [x] step b"
    );
    Ok(())
}

#[test]
fn test_solo_task_is_checked_on_move() -> Result<()> {
    let (temp, vault, config) = setup_vault("# Today\n\n- [ ] **Solo task\n", "# Done\n")?;

    sweep::sweep(&vault, &config)?;

    assert_eq!(read(temp.path(), "Tasks.md"), "# Today");
    assert_eq!(
        read(temp.path(), "Archive/Done.md"),
        "# Done\n\n- [x] **Solo task"
    );
    Ok(())
}

#[test]
fn test_button_block_survives_sweep() -> Result<()> {
    let button = "```button
name Sweep tasks
type command
action Sweep: Move completed tasks
- [ ] **looks like a task
    - [x] looks like a step
```";
    let note = format!(
        "- [ ] **Before\n    - [x] a\n{}\n- [ ] **After\n    - [ ] b\n",
        button
    );
    let (temp, vault, config) = setup_vault(&note, "")?;

    sweep::sweep(&vault, &config)?;

    let updated = read(temp.path(), "Tasks.md");
    assert!(updated.starts_with(button), "button block changed: {updated}");
    assert!(updated.ends_with("- [ ] **After\n    - [ ] b"));
    assert_eq!(
        read(temp.path(), "Archive/Done.md"),
        "- [x] **Before\n    - [x] a"
    );
    Ok(())
}

#[test]
fn test_repeated_sweeps_are_stable() -> Result<()> {
    let (temp, vault, config) = setup_vault(
        "- [ ] **A\n    - [x] a\n- [ ] **B\n    - [ ] b\n- [x] **C\n",
        "# Done",
    )?;

    let first = sweep::sweep(&vault, &config)?;
    let task_note = read(temp.path(), "Tasks.md");
    let new_note = read(temp.path(), "Archive/Done.md");

    let second = sweep::sweep(&vault, &config)?;

    assert_eq!(first.migrated, 2);
    assert_eq!(second.migrated, 0);
    assert!(!second.task_note_changed);
    assert!(!second.new_note_changed);
    assert_eq!(read(temp.path(), "Tasks.md"), task_note);
    assert_eq!(read(temp.path(), "Archive/Done.md"), new_note);
    Ok(())
}

#[test]
fn test_checking_last_step_moves_task_on_next_sweep() -> Result<()> {
    let (temp, vault, config) = setup_vault("- [ ] **A\n    - [x] a\n    - [ ] b", "")?;

    assert_eq!(sweep::sweep(&vault, &config)?.migrated, 0);

    fs::write(
        temp.path().join("Tasks.md"),
        "- [ ] **A\n    - [x] a\n    - [x] b",
    )?;
    assert_eq!(sweep::sweep(&vault, &config)?.migrated, 1);
    assert_eq!(read(temp.path(), "Tasks.md"), "");
    Ok(())
}

#[test]
fn test_missing_new_note_leaves_task_note_untouched() -> Result<()> {
    let (temp, vault, mut config) = setup_vault("- [ ] **A\n", "")?;
    config.new_note_path = "Nope.md".to_string();

    let err = sweep::sweep(&vault, &config).unwrap_err();

    assert!(matches!(err, SweepError::Configuration { .. }));
    assert_eq!(read(temp.path(), "Tasks.md"), "- [ ] **A\n");
    Ok(())
}

#[test]
fn test_dry_run_plan_leaves_files_alone() -> Result<()> {
    let (temp, vault, config) = setup_vault("- [ ] **A\n", "")?;

    let plan = sweep::plan(&vault, &config)?;

    assert_eq!(plan.report(true).migrated, 1);
    assert_eq!(read(temp.path(), "Tasks.md"), "- [ ] **A\n");
    assert_eq!(read(temp.path(), "Archive/Done.md"), "");
    Ok(())
}
