//! Filesystem abstraction
//!
//! The analyzer needs three capabilities: listing directory entries,
//! reading file contents, and stat-ing modification times. Every operation
//! is best-effort - an unreadable entry yields an empty or absent value,
//! never an error - so a partially inaccessible filesystem still produces
//! a complete snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

/// A single directory entry
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Full path of the entry
    pub path: PathBuf,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Filesystem capabilities the analyzer depends on
pub trait WorkspaceFs {
    /// List the entries of a directory, sorted by name.
    ///
    /// A missing or unreadable directory yields an empty list.
    fn read_dir(&self, path: &Path) -> Vec<DirEntry>;

    /// Read a UTF-8 file, or `None` when it is missing or unreadable.
    fn read_to_string(&self, path: &Path) -> Option<String>;

    /// Modification time of a single file, or `None` when it cannot be
    /// statted.
    fn mtime(&self, path: &Path) -> Option<SystemTime>;

    /// Whether the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Most recent modification time of any file under `path`, recursively.
    ///
    /// `None` when the directory is missing or contains no stattable files.
    fn latest_mtime(&self, path: &Path) -> Option<SystemTime> {
        if !self.is_dir(path) {
            return None;
        }
        let mut latest: Option<SystemTime> = None;
        for entry in self.read_dir(path) {
            let candidate = if entry.is_dir {
                self.latest_mtime(&entry.path)
            } else {
                self.mtime(&entry.path)
            };
            if let Some(ts) = candidate {
                if latest.map_or(true, |current| ts > current) {
                    latest = Some(ts);
                }
            }
        }
        latest
    }
}

/// Real filesystem backend
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl WorkspaceFs for OsFs {
    fn read_dir(&self, path: &Path) -> Vec<DirEntry> {
        let Ok(reader) = std::fs::read_dir(path) else {
            tracing::trace!(path = %path.display(), "directory not readable, skipping");
            return Vec::new();
        };
        let mut entries: Vec<DirEntry> = reader
            .filter_map(Result::ok)
            .map(|entry| DirEntry {
                is_dir: entry.file_type().map(|t| t.is_dir()).unwrap_or(false),
                path: entry.path(),
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    fn mtime(&self, path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).ok().and_then(|m| m.modified().ok())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn latest_mtime(&self, path: &Path) -> Option<SystemTime> {
        if !path.is_dir() {
            return None;
        }
        // Unreadable entries are dropped from the walk so one bad file
        // cannot abort the scan.
        WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok().and_then(|m| m.modified().ok()))
            .max()
    }
}

/// In-memory filesystem for tests
///
/// Directories are implied by the files added under them and can also be
/// created empty.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, MemoryFile>,
    dirs: BTreeSet<PathBuf>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: String,
    mtime: SystemTime,
}

impl MemoryFs {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory and all its ancestors
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut current = path.as_path();
        loop {
            self.dirs.insert(current.to_path_buf());
            match current.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => current = parent,
                _ => break,
            }
        }
    }

    /// Add a file with an explicit modification time
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: &str, mtime: SystemTime) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(
            path,
            MemoryFile {
                content: content.to_string(),
                mtime,
            },
        );
    }
}

impl WorkspaceFs for MemoryFs {
    fn read_dir(&self, path: &Path) -> Vec<DirEntry> {
        let mut entries: Vec<DirEntry> = self
            .dirs
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .map(|dir| DirEntry {
                path: dir.clone(),
                is_dir: true,
            })
            .chain(
                self.files
                    .keys()
                    .filter(|file| file.parent() == Some(path))
                    .map(|file| DirEntry {
                        path: file.clone(),
                        is_dir: false,
                    }),
            )
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        self.files.get(path).map(|file| file.content.clone())
    }

    fn mtime(&self, path: &Path) -> Option<SystemTime> {
        self.files.get(path).map(|file| file.mtime)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}
