// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Canonical architectures and their per-format names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{Error, Format, Result};

#[cfg(test)]
#[path = "./arch_test.rs"]
mod arch_test;

/// Canonical architecture identifier.
///
/// The display form is what predicates see as `arch`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Arch {
    #[default]
    #[strum(serialize = "x86_64")]
    #[serde(rename = "x86_64")]
    X86_64,
    Aarch64,
    Armv7,
    I686,
    Ppc64le,
    Riscv64,
}

/// Every (format, architecture) pair with a name in that format.
const MATRIX: &[(Format, Arch, &str)] = &[
    (Format::Deb, Arch::X86_64, "amd64"),
    (Format::Deb, Arch::Aarch64, "arm64"),
    (Format::Deb, Arch::Armv7, "armhf"),
    (Format::Deb, Arch::I686, "i386"),
    (Format::Deb, Arch::Ppc64le, "ppc64el"),
    (Format::Deb, Arch::Riscv64, "riscv64"),
    (Format::Rpm, Arch::X86_64, "x86_64"),
    (Format::Rpm, Arch::Aarch64, "aarch64"),
    (Format::Rpm, Arch::Armv7, "armv7hl"),
    (Format::Rpm, Arch::I686, "i686"),
    (Format::Rpm, Arch::Ppc64le, "ppc64le"),
];

/// Translate a canonical architecture into the name `format` expects.
pub fn translate(format: Format, arch: Arch) -> Result<&'static str> {
    MATRIX
        .iter()
        .find(|(f, a, _)| *f == format && *a == arch)
        .map(|(_, _, name)| *name)
        .ok_or(Error::UnsupportedArchitecture { format, arch })
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "aarch64" | "arm64" => Ok(Self::Aarch64),
            "armv7" | "armv7l" | "armhf" => Ok(Self::Armv7),
            "i686" | "i386" => Ok(Self::I686),
            "ppc64le" | "ppc64el" => Ok(Self::Ppc64le),
            "riscv64" => Ok(Self::Riscv64),
            _ => Err(Error::UnknownArchitecture(value.to_string())),
        }
    }
}
