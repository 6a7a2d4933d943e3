// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Filesystem checks and permission changes for a finished descriptor.

use crate::Result;
use crate::descriptor::TargetDescriptor;
use crate::fs::Filesystem;
use crate::normalize::{ResolvedFile, ensure_regular_file};

#[cfg(test)]
#[path = "./prepare_test.rs"]
mod prepare_test;

fn all_files(descriptor: &TargetDescriptor) -> impl Iterator<Item = (&String, &ResolvedFile)> {
    descriptor.files.iter().chain(descriptor.config_files.iter())
}

/// Check that every file and script the descriptor references is a
/// regular file. Nothing is modified.
pub fn validate(descriptor: &TargetDescriptor, fs: &dyn Filesystem) -> Result<()> {
    for (_, file) in all_files(descriptor) {
        ensure_regular_file(&file.source, fs)?;
    }
    for script in descriptor.scripts.values() {
        ensure_regular_file(script, fs)?;
    }
    Ok(())
}

/// Re-validate the descriptor's inputs and apply each file's mode.
///
/// Scripts are checked but keep their permissions.
pub fn prepare(descriptor: &TargetDescriptor, fs: &dyn Filesystem) -> Result<()> {
    validate(descriptor, fs)?;
    for (target, file) in all_files(descriptor) {
        tracing::debug!("chmod {:04o} {:?} ({target})", file.bits, file.source);
        fs.chmod(&file.source, file.bits)?;
    }
    Ok(())
}
