// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem access used by validation, preparation and artifact output.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./fs_test.rs"]
mod fs_test;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Other,
}

/// The filesystem operations pkgdesc needs.
///
/// Each call must be safe to make concurrently from several builds.
pub trait Filesystem: Send + Sync {
    /// Look up `path`, following symlinks. `None` means it does not exist.
    fn stat(&self, path: &Path) -> Result<Option<FileKind>>;

    /// Set the permission bits of `path`.
    fn chmod(&self, path: &Path, mode: u32) -> Result<()>;

    /// Create (or truncate) `path` for writing.
    fn create(&self, path: &Path) -> Result<Box<dyn Write + Send>>;
}

/// The real filesystem of the build host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn stat(&self, path: &Path) -> Result<Option<FileKind>> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(Some(FileKind::Regular)),
            Ok(meta) if meta.is_dir() => Ok(Some(FileKind::Directory)),
            Ok(_) => Ok(Some(FileKind::Other)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StatFailed {
                path: path.to_path_buf(),
                error: e,
            }),
        }
    }

    #[cfg(unix)]
    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
            Error::ChmodFailed {
                path: path.to_path_buf(),
                mode,
                error: e,
            }
        })
    }

    #[cfg(not(unix))]
    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        tracing::warn!("cannot apply mode {mode:04o} to {path:?} on this platform");
        Ok(())
    }

    fn create(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        let file = std::fs::File::create(path).map_err(|e| Error::CreateFailed {
            path: path.to_path_buf(),
            error: e,
        })?;
        Ok(Box::new(std::io::BufWriter::new(file)))
    }
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    kind: FileKind,
    mode: u32,
    contents: Arc<Mutex<Vec<u8>>>,
}

/// In-memory filesystem for exercising preparation without touching disk.
///
/// Every call made through [`Filesystem`] is counted, see
/// [`MemoryFilesystem::access_count`].
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    entries: DashMap<PathBuf, MemoryEntry>,
    accesses: AtomicUsize,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regular file with the given mode and contents.
    pub fn add_file<P: Into<PathBuf>>(&self, path: P, mode: u32, contents: &[u8]) {
        self.insert(path.into(), FileKind::Regular, mode, contents.to_vec());
    }

    /// Add a directory.
    pub fn add_dir<P: Into<PathBuf>>(&self, path: P) {
        self.insert(path.into(), FileKind::Directory, 0o755, Vec::new());
    }

    /// Add something that is neither a file nor a directory, like a socket.
    pub fn add_special<P: Into<PathBuf>>(&self, path: P) {
        self.insert(path.into(), FileKind::Other, 0o644, Vec::new());
    }

    /// Current permission bits of `path`, if it exists.
    pub fn mode(&self, path: &Path) -> Option<u32> {
        self.entries.get(path).map(|e| e.mode)
    }

    /// Current contents of `path`, if it exists.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        let entry = self.entries.get(path)?;
        let contents = match entry.contents.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Some(contents)
    }

    /// Number of [`Filesystem`] calls made so far.
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    fn insert(&self, path: PathBuf, kind: FileKind, mode: u32, contents: Vec<u8>) {
        self.entries.insert(
            path,
            MemoryEntry {
                kind,
                mode,
                contents: Arc::new(Mutex::new(contents)),
            },
        );
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::SeqCst);
    }
}

impl Filesystem for MemoryFilesystem {
    fn stat(&self, path: &Path) -> Result<Option<FileKind>> {
        self.touch();
        Ok(self.entries.get(path).map(|e| e.kind))
    }

    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        self.touch();
        match self.entries.get_mut(path) {
            Some(mut entry) => {
                entry.mode = mode;
                Ok(())
            }
            None => Err(Error::ChmodFailed {
                path: path.to_path_buf(),
                mode,
                error: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }

    fn create(&self, path: &Path) -> Result<Box<dyn Write + Send>> {
        self.touch();
        let contents = Arc::new(Mutex::new(Vec::new()));
        self.entries.insert(
            path.to_path_buf(),
            MemoryEntry {
                kind: FileKind::Regular,
                mode: 0o644,
                contents: Arc::clone(&contents),
            },
        );
        Ok(Box::new(MemoryWriter { contents }))
    }
}

struct MemoryWriter {
    contents: Arc<Mutex<Vec<u8>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| std::io::Error::other("memory file lock poisoned"))?;
        contents.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
