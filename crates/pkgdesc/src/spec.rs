// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Spec file parsing and data types for package.yaml files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[cfg(test)]
#[path = "./spec_test.rs"]
mod spec_test;

/// API version for spec files.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub enum ApiVersion {
    #[serde(rename = "pkgdesc/v0")]
    V0,
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::V0
    }
}

/// Helper for two-stage deserialization to determine API version first.
#[derive(Deserialize)]
struct ApiVersionMapping {
    #[serde(default)]
    api: ApiVersion,
}

/// Descriptive metadata copied into every descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Meta {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub maintainer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// A file placed into the package, keyed by its install path in the spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileEntry {
    /// Path of the file on the build host.
    pub file: PathBuf,

    /// Octal permission string, defaults to "0644".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Owning user, defaults to "root".
    #[serde(
        default,
        rename = "user",
        alias = "owner",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<String>,

    /// Preserve local modifications across upgrades (config file).
    #[serde(default)]
    pub keep: bool,
}

/// Service units added when `when` holds for the build being resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Conditional {
    pub when: String,
    #[serde(default)]
    pub units: Vec<String>,
}

/// Package lifecycle phase a script runs in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    PreInstall,
    PostInstall,
    PreRemove,
    PostRemove,
}

/// Main package specification from a package.yaml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PackageSpec {
    /// API version identifier.
    #[serde(default)]
    pub api: ApiVersion,

    #[serde(default)]
    pub meta: Meta,

    /// Files to install, keyed by their path inside the package.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, FileEntry>,

    /// Empty directories owned by the package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<String>,

    /// Service units enabled for every format.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<String>,

    /// Lifecycle scripts keyed by phase.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<Phase, PathBuf>,

    /// Units that only apply to some builds, evaluated in order.
    #[serde(default, rename = "conditional", skip_serializing_if = "Vec::is_empty")]
    pub conditionals: Vec<Conditional>,

    /// User the package's services run as.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Path to the file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl PackageSpec {
    /// Parse spec from YAML string.
    pub fn from_yaml<S: Into<String>>(yaml: S) -> crate::Result<Self> {
        let yaml = yaml.into();

        // Stage 1: Parse to get API version
        let value: serde_yaml::Value =
            serde_yaml::from_str(&yaml).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                yaml_content: yaml.clone(),
            })?;

        let with_version: ApiVersionMapping =
            serde_yaml::from_value(value.clone()).map_err(|e| crate::Error::InvalidYaml {
                error: e,
                yaml_content: yaml.clone(),
            })?;

        // Stage 2: Deserialize based on version
        match with_version.api {
            ApiVersion::V0 => {
                serde_yaml::from_value(value).map_err(|e| crate::Error::InvalidYaml {
                    error: e,
                    yaml_content: yaml,
                })
            }
        }
    }

    /// Load spec from file path.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
            path: path.to_path_buf(),
            error: e,
        })?;

        let mut spec = Self::from_yaml(yaml)?;
        spec.source_path = Some(path.to_path_buf());
        Ok(spec)
    }

    /// Check the structural rules serde cannot express.
    pub fn validate(&self) -> crate::Result<()> {
        for (target, entry) in &self.files {
            if target.trim().is_empty() {
                return Err(crate::Error::ValidationFailed(
                    "files: install path must not be empty".to_string(),
                ));
            }
            if entry.file.as_os_str().is_empty() {
                return Err(crate::Error::ValidationFailed(format!(
                    "files: '{target}' has no source file"
                )));
            }
        }

        let all_units = self
            .units
            .iter()
            .chain(self.conditionals.iter().flat_map(|c| c.units.iter()));
        for unit in all_units {
            if unit.trim().is_empty() {
                return Err(crate::Error::ValidationFailed(
                    "units: unit names must not be empty".to_string(),
                ));
            }
        }

        if let Some(cond) = self.conditionals.iter().find(|c| c.when.trim().is_empty()) {
            return Err(crate::Error::ValidationFailed(format!(
                "conditional: missing 'when' for units {:?}",
                cond.units
            )));
        }

        Ok(())
    }
}
