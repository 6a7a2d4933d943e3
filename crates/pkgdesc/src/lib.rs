// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! pkgdesc - Package Descriptor Resolution
//!
//! This crate turns a declarative package spec (`package.yaml`) into one
//! descriptor per requested package format, ready to be handed to an
//! archive writer.
//!
//! # Overview
//!
//! Resolution is pure: [`assemble`] reads the spec, evaluates conditional
//! units for the target format, translates the architecture and fills file
//! defaults without touching the filesystem. Checking and chmod-ing source
//! files happens separately in [`prepare`], and [`PackageBuilder`] ties the
//! steps together for a multi-format build.
//!
//! # Example
//!
//! ```yaml
//! # package.yaml
//! meta:
//!   description: "Example daemon"
//!   license: MIT
//!   vendor: Example Corp
//!   maintainer: ops@example.com
//!
//! files:
//!   /usr/bin/exampled:
//!     file: target/release/exampled
//!     mode: "0755"
//!   /etc/exampled/config.toml:
//!     file: config/default.toml
//!     keep: true
//!
//! units:
//!   - exampled.service
//!
//! conditional:
//!   - when: format == "deb"
//!     units:
//!       - exampled-debian.service
//! ```

pub mod arch;
pub mod backend;
pub mod build;
pub mod ci;
pub mod descriptor;
pub mod error;
pub mod expand;
pub mod format;
pub mod fs;
pub mod normalize;
pub mod predicate;
pub mod prepare;
pub mod spec;
pub mod version;

pub use arch::{Arch, translate};
pub use backend::{ManifestPackager, Packager};
pub use build::{Artifact, PackageBuilder, resolve_all};
pub use descriptor::{PackageIdent, TargetDescriptor, assemble, filename};
pub use error::{Error, Result};
pub use expand::FormatSelection;
pub use format::Format;
pub use fs::{FileKind, Filesystem, LocalFilesystem, MemoryFilesystem};
pub use normalize::ResolvedFile;
pub use predicate::{Context, ExprEngine, PredicateEngine};
pub use spec::{ApiVersion, Conditional, FileEntry, Meta, PackageSpec, Phase};
pub use version::parse_version;

/// Well-known filename for package specs.
pub const PKGDESC_FILENAME: &str = "package.yaml";
