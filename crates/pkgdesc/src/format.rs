// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Output package formats.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::Error;

#[cfg(test)]
#[path = "./format_test.rs"]
mod format_test;

/// A package format that descriptors can be resolved for.
///
/// The declaration order is the canonical order used when expanding
/// the `--deb`/`--rpm` switches.
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
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    /// Debian-style `.deb` archive.
    Deb,
    /// RPM-style `.rpm` archive.
    Rpm,
}

impl Format {
    /// File extension used by archives of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Deb => "deb",
            Self::Rpm => "rpm",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "deb" => Ok(Self::Deb),
            "rpm" => Ok(Self::Rpm),
            _ => Err(Error::UnknownFormat(value.to_string())),
        }
    }
}
