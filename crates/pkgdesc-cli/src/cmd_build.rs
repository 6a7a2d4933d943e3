// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `pkgdesc build` command.

use std::path::PathBuf;

use clap::Args;
use miette::Result;

/// Build package artifacts
#[derive(Debug, Args)]
pub struct CmdBuild {
    #[clap(flatten)]
    package: crate::PackageFlags,

    /// Directory to write artifacts to
    #[clap(short, long, default_value = ".", env = "PKGDESC_OUTPUT_DIR")]
    output_dir: PathBuf,
}

impl CmdBuild {
    pub fn run(&mut self) -> Result<i32> {
        let request = self.package.load()?;

        if !self.output_dir.is_dir() {
            return Err(miette::miette!(
                "Output directory {:?} does not exist",
                self.output_dir
            ));
        }

        let fs = pkgdesc::LocalFilesystem;
        let packager = pkgdesc::ManifestPackager;
        let builder = pkgdesc::PackageBuilder::new(
            &request.spec,
            &request.ident,
            pkgdesc::ExprEngine,
            &fs,
            &packager,
        )
        .with_output_dir(&self.output_dir);

        let in_ci = pkgdesc::ci::running_in_ci();
        let artifacts = builder.build_all(&request.formats, |artifact| {
            if in_ci {
                println!("{}", pkgdesc::ci::output_line(&artifact.path));
            }
        })?;

        if !in_ci {
            for artifact in &artifacts {
                println!("Built {}: {}", artifact.format, artifact.path.display());
            }
        }

        Ok(0)
    }
}
