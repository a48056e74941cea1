//! Sweep on task note changes
//!
//! File system events for the task note are turned into [`ChangeNotice`]s on
//! a channel. A single consumer drains the channel, so watch-triggered sweeps
//! never overlap.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::sweep::InFlight;

/// The watched note was created or modified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub path: PathBuf,
}

/// Keeps the underlying watcher alive. Drop to stop watching.
pub struct NoteWatcher {
    _watcher: RecommendedWatcher,
    note: PathBuf,
}

impl NoteWatcher {
    pub fn note(&self) -> &Path {
        &self.note
    }
}

/// True for create/modify events that touch `note`
pub fn is_note_change(event: &Event, note: &Path) -> bool {
    let relevant_kind = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    relevant_kind && event.paths.iter().any(|p| p == note)
}

/// Watch `note` and send a notice for each change to it.
///
/// The parent directory is watched rather than the file, so editors that save
/// by renaming a temporary file over the note are still seen.
pub fn watch_note(
    note: &Path,
) -> notify::Result<(NoteWatcher, mpsc::UnboundedReceiver<ChangeNotice>)> {
    let note = note.canonicalize().map_err(notify::Error::io)?;
    let dir = note
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, rx) = mpsc::unbounded_channel();
    let target = note.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if is_note_change(&event, &target) {
                    debug!(kind = ?event.kind, "Task note changed");
                    let _ = tx.send(ChangeNotice {
                        path: target.clone(),
                    });
                }
            }
            Err(e) => warn!("File watcher error: {}", e),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    debug!("Watching {}", dir.display());

    Ok((
        NoteWatcher {
            _watcher: watcher,
            note,
        },
        rx,
    ))
}

/// Run `sweep` once per notice until the channel closes.
///
/// After each sweep the loop waits for `settle` and drops every notice that
/// arrived meanwhile; those are mostly the echo of the sweep's own writes.
/// A real edit saved inside that window is dropped as well and only gets
/// swept on the next change to the note.
/// Returns the number of sweeps started.
pub async fn drain_notices<F>(
    rx: &mut mpsc::UnboundedReceiver<ChangeNotice>,
    in_flight: &InFlight,
    settle: Duration,
    mut sweep: F,
) -> usize
where
    F: FnMut(&ChangeNotice),
{
    let mut runs = 0;

    while let Some(notice) = rx.recv().await {
        match in_flight.try_acquire() {
            Some(_guard) => {
                sweep(&notice);
                runs += 1;
            }
            None => {
                debug!("Sweep already running, ignoring change");
                continue;
            }
        }

        tokio::time::sleep(settle).await;
        let mut dropped = 0;
        while rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "Coalesced change notices");
        }
    }

    runs
}
