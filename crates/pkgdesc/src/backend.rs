// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Packaging backends that turn descriptors into artifacts.

use std::io::Write;

use crate::descriptor::TargetDescriptor;

#[cfg(test)]
#[path = "./backend_test.rs"]
mod backend_test;

/// Error type returned by packagers; reported as [`crate::Error::Backend`].
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Writes a finished descriptor out as an artifact.
pub trait Packager: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// File name of the artifact written for `descriptor`.
    fn artifact_name(&self, descriptor: &TargetDescriptor) -> String {
        descriptor.filename.clone()
    }

    /// Encode `descriptor` into `sink`.
    fn encode(
        &self,
        descriptor: &TargetDescriptor,
        sink: &mut dyn Write,
    ) -> Result<(), BackendError>;
}

/// Writes the resolved descriptor as YAML, for an external archive writer.
///
/// The artifact is named after the archive with a `.yaml` suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestPackager;

impl Packager for ManifestPackager {
    fn name(&self) -> &str {
        "manifest"
    }

    fn artifact_name(&self, descriptor: &TargetDescriptor) -> String {
        format!("{}.yaml", descriptor.filename)
    }

    fn encode(
        &self,
        descriptor: &TargetDescriptor,
        sink: &mut dyn Write,
    ) -> Result<(), BackendError> {
        serde_yaml::to_writer(&mut *sink, descriptor)?;
        sink.flush()?;
        Ok(())
    }
}
