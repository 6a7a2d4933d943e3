// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Orchestration of a multi-format package build.
//!
//! Each format runs `assemble -> validate -> prepare -> encode` on its own.
//! The first failure stops the build. Artifacts already written for earlier
//! formats stay on disk; nothing is rolled back.

use std::io::Write;
use std::path::PathBuf;

use indexmap::IndexSet;

use crate::backend::Packager;
use crate::descriptor::{PackageIdent, TargetDescriptor, assemble};
use crate::fs::Filesystem;
use crate::predicate::PredicateEngine;
use crate::spec::PackageSpec;
use crate::{Error, Format, Result, prepare};

#[cfg(test)]
#[path = "./build_test.rs"]
mod build_test;

/// An artifact written by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: Format,
    pub path: PathBuf,
}

/// Resolve the descriptors for every format without touching the filesystem.
pub fn resolve_all<E: PredicateEngine>(
    spec: &PackageSpec,
    ident: &PackageIdent,
    formats: &IndexSet<Format>,
    engine: &E,
) -> Result<Vec<TargetDescriptor>> {
    spec.validate()?;
    formats
        .iter()
        .map(|format| assemble(spec, ident, *format, engine))
        .collect()
}

/// Builds the artifacts of one package spec.
pub struct PackageBuilder<'a, E: PredicateEngine> {
    spec: &'a PackageSpec,
    ident: &'a PackageIdent,
    engine: E,
    fs: &'a dyn Filesystem,
    packager: &'a dyn Packager,
    output_dir: PathBuf,
}

impl<'a, E: PredicateEngine> PackageBuilder<'a, E> {
    pub fn new(
        spec: &'a PackageSpec,
        ident: &'a PackageIdent,
        engine: E,
        fs: &'a dyn Filesystem,
        packager: &'a dyn Packager,
    ) -> Self {
        Self {
            spec,
            ident,
            engine,
            fs,
            packager,
            output_dir: PathBuf::from("."),
        }
    }

    /// Directory artifacts are written to (default: current directory).
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Run the full pipeline for a single format.
    pub fn build(&self, format: Format) -> Result<Artifact> {
        let descriptor = assemble(self.spec, self.ident, format, &self.engine)?;
        tracing::info!("building {}", descriptor.filename);

        prepare::validate(&descriptor, self.fs)?;
        prepare::prepare(&descriptor, self.fs)?;

        let path = self
            .output_dir
            .join(self.packager.artifact_name(&descriptor));
        let mut sink = self.fs.create(&path)?;
        self.packager
            .encode(&descriptor, &mut *sink)
            .map_err(|e| Error::Backend {
                packager: self.packager.name().to_string(),
                filename: descriptor.filename.clone(),
                message: e.to_string(),
            })?;
        sink.flush()?;

        tracing::info!("wrote {}", path.display());
        Ok(Artifact { format, path })
    }

    /// Build every format in order, calling `on_artifact` as each completes.
    ///
    /// Stops at the first failing format.
    pub fn build_all<F>(
        &self,
        formats: &IndexSet<Format>,
        mut on_artifact: F,
    ) -> Result<Vec<Artifact>>
    where
        F: FnMut(&Artifact),
    {
        self.spec.validate()?;

        let mut built: Vec<Artifact> = Vec::new();
        for format in formats {
            match self.build(*format) {
                Ok(artifact) => {
                    on_artifact(&artifact);
                    built.push(artifact);
                }
                Err(err) => {
                    if !built.is_empty() {
                        let paths: Vec<String> =
                            built.iter().map(|a| a.path.display().to_string()).collect();
                        tracing::warn!(
                            "{format} build failed; leaving earlier artifacts in place: {}",
                            paths.join(", ")
                        );
                    }
                    return Err(err);
                }
            }
        }

        if built.is_empty() {
            tracing::warn!("no package formats requested, nothing to build");
        }
        Ok(built)
    }
}
