// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Expansion of the requested output formats.

use indexmap::IndexSet;

use crate::Format;

#[cfg(test)]
#[path = "./expand_test.rs"]
mod expand_test;

/// Which formats a build asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSelection {
    /// Build a .deb (`--deb`).
    pub deb: bool,
    /// Build a .rpm (`--rpm`).
    pub rpm: bool,
    /// Formats listed explicitly (`--format`), in the order given.
    pub formats: Vec<Format>,
}

impl FormatSelection {
    /// The distinct formats to build, in a stable order.
    ///
    /// Switches come first (deb, then rpm), followed by listed formats
    /// not already selected. An empty selection is valid.
    pub fn expand(&self) -> IndexSet<Format> {
        let mut wanted = IndexSet::new();

        if self.deb {
            wanted.insert(Format::Deb);
        }

        if self.rpm {
            wanted.insert(Format::Rpm);
        }

        wanted.extend(self.formats.iter().copied());
        wanted
    }
}
