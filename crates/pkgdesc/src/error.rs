// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for pkgdesc operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::{Arch, Format};

/// Convenience Result type with pkgdesc Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, preparing or encoding packages.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Invalid YAML in package spec file
    #[error("Invalid package spec: {error}")]
    #[diagnostic(
        code(pkgdesc::invalid_yaml),
        help("Check YAML syntax and the field names under meta, files and conditional")
    )]
    InvalidYaml {
        #[source]
        error: serde_yaml::Error,
        yaml_content: String,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(pkgdesc::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Spec validation error
    #[error("Validation failed: {0}")]
    #[diagnostic(code(pkgdesc::validation_failed))]
    ValidationFailed(String),

    /// Format name that is not deb or rpm
    #[error("Unsupported format: {0}")]
    #[diagnostic(code(pkgdesc::unknown_format), help("Supported formats are: deb, rpm"))]
    UnknownFormat(String),

    /// Architecture name outside the canonical set
    #[error("Unsupported architecture: {0}")]
    #[diagnostic(
        code(pkgdesc::unknown_architecture),
        help("Supported architectures are: x86_64, aarch64, armv7, i686, ppc64le, riscv64")
    )]
    UnknownArchitecture(String),

    /// Package name that cannot be used in an archive filename
    #[error("Invalid package name '{name}': {reason}")]
    #[diagnostic(code(pkgdesc::invalid_package_name))]
    InvalidPackageName { name: String, reason: String },

    /// Package version that is not a semantic version
    #[error("Invalid version '{version}': {error}")]
    #[diagnostic(code(pkgdesc::invalid_version))]
    InvalidVersion {
        version: String,
        #[source]
        error: semver::Error,
    },

    /// Architecture has no name in the target format
    #[error("Architecture {arch} is not supported by the {format} format")]
    #[diagnostic(code(pkgdesc::unsupported_architecture))]
    UnsupportedArchitecture { format: Format, arch: Arch },

    /// Permission string is not an octal mode in 0..=0777
    #[error("Invalid file mode '{mode}' for {path:?}")]
    #[diagnostic(
        code(pkgdesc::invalid_file_mode),
        help("Modes are octal strings between 0000 and 0777, for example \"0755\"")
    )]
    InvalidFileMode { path: PathBuf, mode: String },

    /// Source file does not exist
    #[error("'{0}' is not a file: no such file or directory")]
    #[diagnostic(code(pkgdesc::file_not_found))]
    FileNotFound(PathBuf),

    /// Source path exists but is a directory, device, socket...
    #[error("'{0}' is not a regular file")]
    #[diagnostic(code(pkgdesc::not_a_regular_file))]
    NotARegularFile(PathBuf),

    /// Predicate could not be parsed
    #[error("Invalid predicate '{expression}': {reason}")]
    #[diagnostic(
        code(pkgdesc::predicate_syntax),
        help("Predicates compare arch, version and format, e.g. format == \"deb\"")
    )]
    PredicateSyntax { expression: String, reason: String },

    /// Predicate parsed but could not be evaluated to a boolean
    #[error("Failed to evaluate predicate '{expression}': {reason}")]
    #[diagnostic(code(pkgdesc::predicate_evaluation))]
    PredicateEvaluation { expression: String, reason: String },

    /// Failed to stat a path
    #[error("Failed to stat {path:?}")]
    #[diagnostic(code(pkgdesc::stat_failed))]
    StatFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to change file permissions
    #[error("Failed to chmod {path:?} to {mode:04o}")]
    #[diagnostic(code(pkgdesc::chmod_failed))]
    ChmodFailed {
        path: PathBuf,
        mode: u32,
        #[source]
        error: std::io::Error,
    },

    /// Failed to create an output file
    #[error("Failed to create {path:?}")]
    #[diagnostic(code(pkgdesc::create_failed))]
    CreateFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Packaging backend failure
    #[error("The {packager} packager failed to encode {filename}: {message}")]
    #[diagnostic(code(pkgdesc::backend))]
    Backend {
        packager: String,
        filename: String,
        message: String,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(pkgdesc::io_error))]
    Io(#[from] std::io::Error),
}
