// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Default filling and validation of file entries.

use std::path::Path;

use serde::Serialize;

use crate::fs::{FileKind, Filesystem};
use crate::spec::FileEntry;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./normalize_test.rs"]
mod normalize_test;

/// Owner given to files that do not name one.
pub const DEFAULT_OWNER: &str = "root";

/// Mode given to files that do not set one.
pub const DEFAULT_MODE: &str = "0644";

const MAX_MODE: u32 = 0o777;

/// A file entry with owner and mode filled in and the mode parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    /// Path of the file on the build host.
    pub source: std::path::PathBuf,
    pub owner: String,
    /// Mode as written in the spec (or the default).
    pub mode: String,
    /// Parsed permission bits.
    #[serde(skip)]
    pub bits: u32,
}

impl FileEntry {
    /// Fill owner and mode when they are unset. Explicit values are kept.
    pub fn with_defaults(&self) -> FileEntry {
        FileEntry {
            file: self.file.clone(),
            mode: Some(self.mode.clone().unwrap_or_else(|| DEFAULT_MODE.to_string())),
            owner: Some(self.owner.clone().unwrap_or_else(|| DEFAULT_OWNER.to_string())),
            keep: self.keep,
        }
    }

    /// Fill defaults and parse the mode, without touching the filesystem.
    pub fn resolve(&self) -> Result<ResolvedFile> {
        let filled = self.with_defaults();
        let mode = filled.mode.unwrap_or_default();
        let bits = parse_mode(&mode).ok_or_else(|| Error::InvalidFileMode {
            path: self.file.clone(),
            mode: mode.clone(),
        })?;
        Ok(ResolvedFile {
            source: filled.file,
            owner: filled.owner.unwrap_or_default(),
            mode,
            bits,
        })
    }

    /// Parse the mode, then check the source is a regular file.
    ///
    /// An invalid mode is reported before `fs` is consulted.
    pub fn validate(&self, fs: &dyn Filesystem) -> Result<ResolvedFile> {
        let resolved = self.resolve()?;
        ensure_regular_file(&resolved.source, fs)?;
        Ok(resolved)
    }
}

/// Parse a plain octal permission string in `0..=0o777`.
///
/// Only octal digits are accepted: no sign, prefix or whitespace.
pub fn parse_mode(mode: &str) -> Option<u32> {
    if mode.is_empty() || !mode.bytes().all(|b| matches!(b, b'0'..=b'7')) {
        return None;
    }
    u32::from_str_radix(mode, 8)
        .ok()
        .filter(|bits| *bits <= MAX_MODE)
}

/// Fail unless `path` exists and is a regular file.
pub fn ensure_regular_file(path: &Path, fs: &dyn Filesystem) -> Result<()> {
    match fs.stat(path)? {
        Some(FileKind::Regular) => Ok(()),
        Some(_) => Err(Error::NotARegularFile(path.to_path_buf())),
        None => Err(Error::FileNotFound(path.to_path_buf())),
    }
}
