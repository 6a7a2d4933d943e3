// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! pkgdesc - Package Descriptor Resolution CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indexmap::IndexSet;
use miette::Result;

mod cmd_build;
mod cmd_check;
mod cmd_init;
mod cmd_show;

use cmd_build::CmdBuild;
use cmd_check::CmdCheck;
use cmd_init::CmdInit;
use cmd_show::CmdShow;

#[derive(Parser)]
#[clap(
    name = "pkgdesc",
    about = "Package Descriptor Resolution",
    version,
    long_about = "Resolve a package.yaml into deb and rpm package descriptors"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

/// Flags naming the package and the formats to resolve it for.
#[derive(clap::Args, Clone, Debug)]
pub struct PackageFlags {
    /// Package name
    #[clap(long)]
    pub name: String,

    /// Package version (semantic version, a leading 'v' is accepted)
    #[clap(long = "version", value_name = "VERSION")]
    pub pkg_version: String,

    /// Package architecture
    #[clap(long, default_value = "x86_64", env = "PKGDESC_ARCH")]
    pub arch: pkgdesc::Arch,

    /// Build a .deb package
    #[clap(long)]
    pub deb: bool,

    /// Build a .rpm package
    #[clap(long)]
    pub rpm: bool,

    /// Package format (repeatable or comma separated)
    #[clap(long = "format", value_delimiter = ',', env = "PKGDESC_FORMAT")]
    pub formats: Vec<pkgdesc::Format>,

    /// Package spec file
    #[clap(value_name = "package.yaml", default_value = pkgdesc::PKGDESC_FILENAME)]
    pub spec: PathBuf,
}

/// A loaded spec together with what to build from it.
pub struct Request {
    pub spec: pkgdesc::PackageSpec,
    pub ident: pkgdesc::PackageIdent,
    pub formats: IndexSet<pkgdesc::Format>,
}

impl PackageFlags {
    /// Parse the version, load the spec and expand the format selection.
    pub fn load(&self) -> Result<Request> {
        let version = pkgdesc::parse_version(&self.pkg_version)?;
        let spec = pkgdesc::PackageSpec::load(&self.spec)?;

        let formats = pkgdesc::FormatSelection {
            deb: self.deb,
            rpm: self.rpm,
            formats: self.formats.clone(),
        }
        .expand();

        Ok(Request {
            spec,
            ident: pkgdesc::PackageIdent {
                name: self.name.clone(),
                version,
                arch: self.arch,
            },
            formats,
        })
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build package artifacts
    Build(CmdBuild),

    /// Display resolved package descriptors
    Show(CmdShow),

    /// Validate the spec and its source files
    Check(CmdCheck),

    /// Create a new package.yaml file
    Init(CmdInit),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        tracing::info!("pkgdesc {}", env!("CARGO_PKG_VERSION"));

        // Dispatch to command
        match self.cmd {
            Command::Build(mut cmd) => cmd.run(),
            Command::Show(mut cmd) => cmd.run(),
            Command::Check(mut cmd) => cmd.run(),
            Command::Init(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
