// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Validate a package spec without writing anything.

use clap::Args;
use miette::Result;

/// Validate the spec and its source files
#[derive(Debug, Args)]
pub struct CmdCheck {
    #[clap(flatten)]
    package: crate::PackageFlags,
}

impl CmdCheck {
    pub fn run(&mut self) -> Result<i32> {
        let request = self.package.load()?;
        let descriptors = pkgdesc::resolve_all(
            &request.spec,
            &request.ident,
            &request.formats,
            &pkgdesc::ExprEngine,
        )?;

        if descriptors.is_empty() {
            println!("Warning: no formats requested, only the spec was checked");
            return Ok(0);
        }

        let fs = pkgdesc::LocalFilesystem;
        for descriptor in &descriptors {
            pkgdesc::prepare::validate(descriptor, &fs)?;
            println!(
                "✓ {}: {} ({} file(s), {} unit(s))",
                descriptor.format,
                descriptor.filename,
                descriptor.files.len() + descriptor.config_files.len(),
                descriptor.units.len()
            );
        }

        Ok(0)
    }
}
