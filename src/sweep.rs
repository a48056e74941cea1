//! One sweep of the task note: resolve, read, migrate, write back.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::task::{migrate, Migration};
use crate::vault::{NoteFile, Vault};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Invalid file paths: {}", .missing.join(", "))]
    Configuration { missing: Vec<String> },

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SweepError>;

/// What a sweep did (or would do, for a dry run)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub task_note: String,
    pub new_note: String,
    pub migrated: usize,
    pub retained: usize,
    pub task_note_changed: bool,
    pub new_note_changed: bool,
    pub dry_run: bool,
}

/// A computed sweep that has not been written yet
#[derive(Debug, Clone)]
pub struct Plan {
    pub task_note: NoteFile,
    pub new_note: NoteFile,
    pub task_note_before: String,
    pub new_note_before: String,
    pub migration: Migration,
}

impl Plan {
    pub fn task_note_changed(&self) -> bool {
        self.task_note_before != self.migration.updated_task_note
    }

    pub fn new_note_changed(&self) -> bool {
        self.new_note_before != self.migration.new_note
    }

    pub fn report(&self, dry_run: bool) -> SweepReport {
        SweepReport {
            task_note: self.task_note.path().to_string(),
            new_note: self.new_note.path().to_string(),
            migrated: self.migration.migrated.len(),
            retained: self.migration.retained,
            task_note_changed: self.task_note_changed(),
            new_note_changed: self.new_note_changed(),
            dry_run,
        }
    }
}

fn describe(path: &str) -> String {
    if path.trim().is_empty() {
        "(unset)".to_string()
    } else {
        path.to_string()
    }
}

/// Resolve both configured notes, read them and compute the migration.
///
/// Nothing is written. Fails before reading anything if either path does not
/// resolve to an existing note.
pub fn plan(vault: &dyn Vault, config: &Config) -> Result<Plan> {
    let task_note = vault.resolve(&config.task_note_path);
    let new_note = vault.resolve(&config.new_note_path);

    let (task_note, new_note) = match (task_note, new_note) {
        (Some(task_note), Some(new_note)) => (task_note, new_note),
        (task_note, new_note) => {
            let mut missing = Vec::new();
            if task_note.is_none() {
                missing.push(format!("task note {}", describe(&config.task_note_path)));
            }
            if new_note.is_none() {
                missing.push(format!("new note {}", describe(&config.new_note_path)));
            }
            return Err(SweepError::Configuration { missing });
        }
    };

    let read = |file: &NoteFile| {
        vault.read_text(file).map_err(|source| SweepError::Io {
            action: "read",
            path: file.path().to_string(),
            source,
        })
    };
    let task_note_before = read(&task_note)?;
    let new_note_before = read(&new_note)?;

    let migration = migrate(&task_note_before, &new_note_before);

    Ok(Plan {
        task_note,
        new_note,
        task_note_before,
        new_note_before,
        migration,
    })
}

/// Write both outputs of a plan, task note first.
///
/// A failed write is not retried, and a task note write that already
/// succeeded stays applied.
pub fn apply(vault: &dyn Vault, plan: &Plan) -> Result<SweepReport> {
    let write = |file: &NoteFile, text: &str| {
        vault.write_text(file, text).map_err(|source| SweepError::Io {
            action: "write",
            path: file.path().to_string(),
            source,
        })
    };
    write(&plan.task_note, &plan.migration.updated_task_note)?;
    write(&plan.new_note, &plan.migration.new_note)?;

    Ok(plan.report(false))
}

/// Run one complete sweep, logging its outcome
pub fn sweep(vault: &dyn Vault, config: &Config) -> Result<SweepReport> {
    let result = plan(vault, config).and_then(|plan| apply(vault, &plan));

    match &result {
        Ok(report) => info!(
            migrated = report.migrated,
            retained = report.retained,
            "Swept {} into {}",
            report.task_note,
            report.new_note
        ),
        Err(e) => error!("Sweep did not complete: {}", e),
    }

    result
}

/// At-most-one flag for sweeps started by change notifications.
///
/// Manual sweeps do not consult it.
#[derive(Debug, Default)]
pub struct InFlight {
    running: AtomicBool,
}

impl InFlight {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Claim the flag, or `None` if a sweep is already running
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        if self.running.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(InFlightGuard {
            running: &self.running,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Clears the in-flight flag when dropped
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
