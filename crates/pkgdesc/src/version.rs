// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Package version parsing.

use crate::{Error, Result};

#[cfg(test)]
#[path = "./version_test.rs"]
mod version_test;

/// Parse a package version.
///
/// Accepts an optional leading `v` and pads missing minor/patch
/// components with zero, so `v1.2` becomes `1.2.0`.
pub fn parse_version(value: &str) -> Result<semver::Version> {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);

    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);
    let components = core.split('.').count();
    let padded = match components {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };

    semver::Version::parse(&padded).map_err(|error| Error::InvalidVersion {
        version: value.to_string(),
        error,
    })
}
