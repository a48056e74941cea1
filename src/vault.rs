//! Note storage
//!
//! Both configured note paths are resolved against a [`Vault`]. The
//! filesystem implementation is rooted at a directory; the in-memory one backs
//! tests and embedders that manage note text themselves.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

/// A note that exists in a vault, addressed by its vault path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteFile {
    path: String,
}

impl NoteFile {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Storage the sweep reads notes from and writes them back to
pub trait Vault: Send + Sync {
    /// Resolve a configured path to an existing note, or `None`
    fn resolve(&self, path: &str) -> Option<NoteFile>;

    fn read_text(&self, file: &NoteFile) -> io::Result<String>;

    fn write_text(&self, file: &NoteFile, text: &str) -> io::Result<()>;

    /// Every note path in the vault, sorted
    fn list_paths(&self) -> io::Result<Vec<String>>;
}

/// Vault backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a vault path
    pub fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Vault for FsVault {
    fn resolve(&self, path: &str) -> Option<NoteFile> {
        if path.trim().is_empty() {
            return None;
        }
        if self.full_path(path).is_file() {
            Some(NoteFile {
                path: path.to_string(),
            })
        } else {
            debug!("{} does not resolve to a file", self.full_path(path).display());
            None
        }
    }

    fn read_text(&self, file: &NoteFile) -> io::Result<String> {
        fs::read_to_string(self.full_path(&file.path))
    }

    fn write_text(&self, file: &NoteFile, text: &str) -> io::Result<()> {
        fs::write(self.full_path(&file.path), text)
    }

    fn list_paths(&self) -> io::Result<Vec<String>> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &self.root, &mut paths)?;
        paths.sort();
        Ok(paths)
    }
}

/// Walk `dir`, skipping hidden entries such as `.git` or `.obsidian`
fn collect_paths(root: &Path, dir: &Path, out: &mut Vec<String>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            collect_paths(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            out.push(parts.join("/"));
        }
    }
    Ok(())
}

/// Vault holding notes in memory
#[derive(Debug, Default)]
pub struct MemoryVault {
    notes: Mutex<BTreeMap<String, String>>,
    read_only: Mutex<HashSet<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(self, path: &str, text: &str) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&self, path: &str, text: &str) {
        lock(&self.notes).insert(path.to_string(), text.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        lock(&self.notes).get(path).cloned()
    }

    /// Make writes to `path` fail with `PermissionDenied`
    pub fn deny_writes(&self, path: &str) {
        lock(&self.read_only).insert(path.to_string());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Vault for MemoryVault {
    fn resolve(&self, path: &str) -> Option<NoteFile> {
        lock(&self.notes).contains_key(path).then(|| NoteFile {
            path: path.to_string(),
        })
    }

    fn read_text(&self, file: &NoteFile) -> io::Result<String> {
        self.get(&file.path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, file.path.clone()))
    }

    fn write_text(&self, file: &NoteFile, text: &str) -> io::Result<()> {
        if lock(&self.read_only).contains(&file.path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", file.path),
            ));
        }
        self.insert(&file.path, text);
        Ok(())
    }

    fn list_paths(&self) -> io::Result<Vec<String>> {
        Ok(lock(&self.notes).keys().cloned().collect())
    }
}
