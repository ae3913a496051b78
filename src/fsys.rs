//! Filesystem abstraction for Plugset
//!
//! Plugins that read project files receive a [`FsRef`] during a "configure
//! filesystem" broadcast instead of touching the disk directly. This keeps
//! plugins testable: hand them a [`MemoryFileSystem`] in tests and an
//! [`OsFileSystem`] in production.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A shared handle to a read-only filesystem.
pub type FsRef = Arc<dyn FileSystem>;

/// Read-only filesystem access.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Read the entire contents of the file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// List the entries directly under the directory at `path`.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Report whether `path` exists as a file or directory.
    fn exists(&self, path: &Path) -> bool;
}

/// A [`FileSystem`] over a directory on disk. All paths are resolved
/// relative to the root given at construction.
#[derive(Debug)]
pub struct OsFileSystem {
    root: PathBuf,
}

impl OsFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            let name = PathBuf::from(entry.file_name());
            entries.push(path.join(name));
        }
        entries.sort();
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }
}

/// An in-memory [`FileSystem`] backed by a sorted map. Intended for tests.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at `path` with the given contents, replacing any
    /// previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        // BTreeMap iteration keeps results sorted.
        let entries: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();

        if entries.is_empty() && !self.exists(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}", path.display()),
            ));
        }

        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        if self.files.contains_key(path) {
            return true;
        }
        // A directory exists if any file lives beneath it.
        self.files.keys().any(|p| p.starts_with(path) && p != path)
    }
}
