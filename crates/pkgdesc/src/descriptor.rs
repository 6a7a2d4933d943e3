// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Assembly of format-specific package descriptors.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::normalize::ResolvedFile;
use crate::predicate::{Context, PredicateEngine, conditional_units};
use crate::spec::{PackageSpec, Phase};
use crate::{Arch, Error, Format, Result, arch};

#[cfg(test)]
#[path = "./descriptor_test.rs"]
mod descriptor_test;

/// Package release appended to every version.
pub const RELEASE: &str = "1";

/// Target platform of every descriptor.
pub const PLATFORM: &str = "linux";

/// Name, version and architecture of the package being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdent {
    pub name: String,
    pub version: semver::Version,
    pub arch: Arch,
}

impl PackageIdent {
    /// Check that the name can be used inside an archive filename.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.name.trim().is_empty() {
            "must not be empty"
        } else if self.name.contains(['/', '\\']) {
            "must not contain path separators"
        } else if self.name.contains("..") {
            "must not contain '..'"
        } else {
            return Ok(());
        };
        Err(Error::InvalidPackageName {
            name: self.name.clone(),
            reason: reason.to_string(),
        })
    }
}

/// Descriptive fields of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub version: String,
    pub release: String,
    pub platform: String,
    pub description: String,
    pub license: String,
    pub vendor: String,
    pub maintainer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// Everything a packaging backend needs to write one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDescriptor {
    pub format: Format,
    /// Architecture as the format names it.
    pub arch: String,
    pub filename: String,
    pub meta: Metadata,
    /// Content files keyed by install path.
    pub files: BTreeMap<String, ResolvedFile>,
    /// Preserved (config) files keyed by install path.
    pub config_files: BTreeMap<String, ResolvedFile>,
    pub dirs: Vec<String>,
    pub units: Vec<String>,
    pub scripts: BTreeMap<Phase, PathBuf>,
    pub user: String,
}

/// Resolve `spec` into the descriptor for one format.
///
/// The spec is only read; calling this again with the same inputs yields
/// an equal descriptor.
pub fn assemble<E: PredicateEngine>(
    spec: &PackageSpec,
    ident: &PackageIdent,
    format: Format,
    engine: &E,
) -> Result<TargetDescriptor> {
    ident.validate()?;
    let version = ident.version.to_string();
    let arch = arch::translate(format, ident.arch)?;

    let context = Context::new(ident.arch, &version, format);
    let mut units = spec.units.clone();
    units.extend(conditional_units(engine, &spec.conditionals, &context)?);

    let mut files = BTreeMap::new();
    let mut config_files = BTreeMap::new();
    for (target, entry) in &spec.files {
        let resolved = entry.resolve()?;
        tracing::debug!(
            %target,
            source = ?resolved.source,
            keep = entry.keep,
            "{format}: resolved file"
        );
        if entry.keep {
            config_files.insert(target.clone(), resolved);
        } else {
            files.insert(target.clone(), resolved);
        }
    }

    Ok(TargetDescriptor {
        format,
        arch: arch.to_string(),
        filename: filename(format, &ident.name, &version, arch),
        meta: Metadata {
            name: ident.name.clone(),
            version,
            release: RELEASE.to_string(),
            platform: PLATFORM.to_string(),
            description: spec.meta.description.clone(),
            license: spec.meta.license.clone(),
            vendor: spec.meta.vendor.clone(),
            maintainer: spec.meta.maintainer.clone(),
            homepage: spec.meta.homepage.clone(),
        },
        files,
        config_files,
        dirs: spec.dirs.clone(),
        units,
        scripts: spec.scripts.clone(),
        user: spec.user.clone(),
    })
}

/// Archive filename for a package, `arch` being the translated name.
pub fn filename(format: Format, name: &str, version: &str, arch: &str) -> String {
    let ext = format.extension();
    match format {
        Format::Deb => format!("{name}_{version}-{RELEASE}_{arch}.{ext}"),
        Format::Rpm => format!("{name}-{version}-{RELEASE}.{arch}.{ext}"),
    }
}
